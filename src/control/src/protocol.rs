//! The two-symbol command protocol and the radio capability.

/// One protocol message. The wire form is the literal ASCII name; there
/// is no payload, sequence number, or acknowledgement.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Symbol {
    Set,
    Reset,
}

impl Symbol {
    /// Wire encoding of the symbol.
    pub const fn as_str(self) -> &'static str {
        match self {
            Symbol::Set => "Set",
            Symbol::Reset => "Reset",
        }
    }

    /// Decode one received message. Anything else on the channel is
    /// noise and decodes to `None`.
    pub fn parse(message: &str) -> Option<Symbol> {
        match message {
            "Set" => Some(Symbol::Set),
            "Reset" => Some(Symbol::Reset),
            _ => None,
        }
    }

    /// The symbol announcing an operate / stand-down decision.
    pub const fn for_decision(operate: bool) -> Symbol {
        if operate {
            Symbol::Set
        } else {
            Symbol::Reset
        }
    }
}

/// Capability offered by a radio backend.
///
/// The link is fire and forget. Backends deal with their own transport
/// problems; a lost message is corrected by the next scheduled
/// transmission, never by a retry.
pub trait RadioLink {
    /// Send one symbol, best effort.
    fn transmit(&mut self, symbol: Symbol);

    /// Poll for a symbol without blocking.
    fn receive(&mut self) -> Option<Symbol>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_survive_the_wire() {
        assert_eq!(Symbol::parse(Symbol::Set.as_str()), Some(Symbol::Set));
        assert_eq!(Symbol::parse(Symbol::Reset.as_str()), Some(Symbol::Reset));
    }

    #[test]
    fn test_noise_decodes_to_none() {
        assert_eq!(Symbol::parse(""), None);
        assert_eq!(Symbol::parse("set"), None);
        assert_eq!(Symbol::parse("SET"), None);
        assert_eq!(Symbol::parse("Set "), None);
        assert_eq!(Symbol::parse("Reboot"), None);
    }

    #[test]
    fn test_decision_maps_to_symbol() {
        assert_eq!(Symbol::for_decision(true), Symbol::Set);
        assert_eq!(Symbol::for_decision(false), Symbol::Reset);
    }
}

//! Poll-loop state for the receiving device.
//!
//! The receiver is deliberately dumb: decode whatever arrived, pulse the
//! matching relay line, keep a liveness flag flapping. All the policy
//! lives on the transmitting side.

use crate::protocol::Symbol;

/// Which latching-relay input a received symbol pulses.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PulseLine {
    /// Latches the load on.
    Set,
    /// Latches the load off.
    Reset,
}

/// State carried between receive polls: nothing but the liveness flag.
#[derive(Debug, Default)]
pub struct ReceiverState {
    heartbeat: bool,
}

impl ReceiverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one poll result. The heartbeat toggles on every call,
    /// message or not; a decoded symbol maps to the line to pulse.
    pub fn on_poll(&mut self, message: Option<Symbol>) -> Option<PulseLine> {
        self.heartbeat = !self.heartbeat;
        message.map(|symbol| match symbol {
            Symbol::Set => PulseLine::Set,
            Symbol::Reset => PulseLine::Reset,
        })
    }

    /// Liveness flag, alternating once per poll.
    pub fn heartbeat(&self) -> bool {
        self.heartbeat
    }
}

use std::net::UdpSocket;

use anyhow::{Context, Result};
use log::{debug, warn};

use control::{RadioLink, Symbol};

/// Datagram stand-in for the packet radio. Delivery is unacknowledged
/// and lossy, the same contract as the real link, so nothing above this
/// layer can tell the difference.
pub struct UdpRadio {
    socket: UdpSocket,
    target: String,
}

impl UdpRadio {
    /// Bind an ephemeral local port and aim at the receiver.
    pub fn connect(target: &str) -> Result<UdpRadio> {
        let socket = UdpSocket::bind("0.0.0.0:0").context("binding radio socket")?;
        socket
            .connect(target)
            .with_context(|| format!("aiming radio at {target}"))?;
        Ok(UdpRadio {
            socket,
            target: target.to_string(),
        })
    }
}

impl RadioLink for UdpRadio {
    fn transmit(&mut self, symbol: Symbol) {
        match self.socket.send(symbol.as_str().as_bytes()) {
            Ok(_) => debug!("sent {} to {}", symbol.as_str(), self.target),
            Err(err) => warn!("radio send failed: {err}"),
        }
    }

    fn receive(&mut self) -> Option<Symbol> {
        // The controller end only talks.
        None
    }
}

/// In-memory link for tests: remembers every transmission.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryRadio {
    pub sent: Vec<Symbol>,
}

#[cfg(test)]
impl RadioLink for MemoryRadio {
    fn transmit(&mut self, symbol: Symbol) {
        self.sent.push(symbol);
    }

    fn receive(&mut self) -> Option<Symbol> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    #[test]
    fn test_symbols_cross_the_loopback() {
        let listener = UdpSocket::bind("127.0.0.1:0").expect("bind listener");
        let target: SocketAddr = listener.local_addr().expect("local addr");

        let mut radio = UdpRadio::connect(&target.to_string()).expect("connect");
        radio.transmit(Symbol::Set);

        let mut buf = [0u8; 16];
        let received = listener.recv(&mut buf).expect("recv");
        assert_eq!(&buf[..received], b"Set");
    }

    #[test]
    fn test_transmit_without_a_listener_does_not_panic() {
        // Nothing bound on the far side; fire and forget shrugs.
        let mut radio = UdpRadio::connect("127.0.0.1:9").expect("connect");
        radio.transmit(Symbol::Reset);
        radio.transmit(Symbol::Set);
    }
}

use std::io::ErrorKind;
use std::net::UdpSocket;
use std::str;

use anyhow::{Context, Result};
use log::{debug, warn};

use control::{RadioLink, Symbol};

/// Receiving half of the datagram link. Non-blocking, so the poll loop
/// keeps its cadence whether or not anything arrived.
pub struct UdpListener {
    socket: UdpSocket,
    buf: [u8; 64],
}

impl UdpListener {
    pub fn bind(addr: &str) -> Result<UdpListener> {
        let socket =
            UdpSocket::bind(addr).with_context(|| format!("binding radio listener on {addr}"))?;
        socket
            .set_nonblocking(true)
            .context("setting radio listener non-blocking")?;
        Ok(UdpListener {
            socket,
            buf: [0; 64],
        })
    }

    #[cfg(test)]
    pub fn local_addr(&self) -> Result<std::net::SocketAddr> {
        Ok(self.socket.local_addr()?)
    }
}

impl RadioLink for UdpListener {
    fn transmit(&mut self, _symbol: Symbol) {
        // The receiving end only listens.
    }

    /// One receive attempt. Undecodable payloads are noise and are
    /// dropped here.
    fn receive(&mut self) -> Option<Symbol> {
        match self.socket.recv(&mut self.buf) {
            Ok(len) => {
                let message = str::from_utf8(&self.buf[..len]).ok()?;
                let symbol = Symbol::parse(message);
                if symbol.is_none() {
                    debug!("ignoring unrecognized message {message:?}");
                }
                symbol
            }
            Err(err) if err.kind() == ErrorKind::WouldBlock => None,
            Err(err) => {
                warn!("radio receive failed: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loopback_pair() -> (UdpListener, UdpSocket) {
        let listener = UdpListener::bind("127.0.0.1:0").expect("bind listener");
        let sender = UdpSocket::bind("127.0.0.1:0").expect("bind sender");
        sender
            .connect(listener.local_addr().expect("local addr"))
            .expect("connect");
        (listener, sender)
    }

    #[test]
    fn test_quiet_channel_yields_nothing() {
        let (mut listener, _sender) = loopback_pair();
        assert_eq!(listener.receive(), None);
    }

    #[test]
    fn test_symbols_are_decoded() {
        let (mut listener, sender) = loopback_pair();
        sender.send(b"Set").expect("send");
        sender.send(b"Reset").expect("send");

        // Datagrams arrive asynchronously on loopback.
        let mut received = Vec::new();
        for _ in 0..200 {
            if let Some(symbol) = listener.receive() {
                received.push(symbol);
                if received.len() == 2 {
                    break;
                }
            }
            std::thread::sleep(core::time::Duration::from_millis(1));
        }
        assert_eq!(received, vec![Symbol::Set, Symbol::Reset]);
    }

    #[test]
    fn test_noise_is_dropped() {
        let (mut listener, sender) = loopback_pair();
        sender.send(b"Reboot").expect("send");
        sender.send(&[0xff, 0xfe]).expect("send");

        let mut decoded = None;
        for _ in 0..200 {
            if let Some(symbol) = listener.receive() {
                decoded = Some(symbol);
                break;
            }
            std::thread::sleep(core::time::Duration::from_millis(1));
        }
        assert_eq!(decoded, None);
    }
}

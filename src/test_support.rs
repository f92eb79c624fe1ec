//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::io;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::DateTime;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::core::state::ChatState;
use crate::net::transport::{Datagram, PeerAddress, Transport, TransportError};

/// In-memory transport: records every send, and yields whatever the test
/// pushes into the inbound channel from `receive_one`.
pub struct MemoryTransport {
    sent: Mutex<Vec<(Vec<u8>, SocketAddr)>>,
    inbound: tokio::sync::Mutex<UnboundedReceiver<io::Result<Datagram>>>,
    fail_sends: AtomicBool,
}

impl MemoryTransport {
    pub fn new() -> (Self, UnboundedSender<io::Result<Datagram>>) {
        let (tx, rx) = unbounded_channel();
        let transport = Self {
            sent: Mutex::new(Vec::new()),
            inbound: tokio::sync::Mutex::new(rx),
            fail_sends: AtomicBool::new(false),
        };
        (transport, tx)
    }

    /// Make subsequent sends fail with `TransportError::Send`.
    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(Vec<u8>, SocketAddr)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send_to(&self, payload: &[u8], peer: &PeerAddress) -> Result<usize, TransportError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::Send(io::Error::new(
                io::ErrorKind::HostUnreachable,
                "no route to host",
            )));
        }
        self.sent.lock().unwrap().push((payload.to_vec(), peer.addr));
        Ok(payload.len())
    }

    async fn receive_one(&self) -> Result<Datagram, TransportError> {
        match self.inbound.lock().await.recv().await {
            Some(Ok(datagram)) => Ok(datagram),
            Some(Err(e)) => Err(TransportError::Receive(e)),
            None => Err(TransportError::Receive(io::Error::new(
                io::ErrorKind::NotConnected,
                "socket closed",
            ))),
        }
    }
}

pub fn test_peer() -> PeerAddress {
    PeerAddress::new("100.64.0.2", "100.64.0.2:9999".parse().unwrap())
}

/// Creates a test state for user "alice" talking to `test_peer()`.
pub fn test_state() -> ChatState {
    ChatState::new("alice".to_string(), test_peer())
}

/// Wraps a JSON packet from "bob" into a datagram from the test peer.
pub fn remote_datagram(text: &str, timestamp: &str) -> Datagram {
    assert!(
        DateTime::parse_from_rfc3339(timestamp).is_ok(),
        "fixture timestamp is not RFC 3339: {timestamp}"
    );
    let payload = serde_json::json!({
        "sender": "bob",
        "text": text,
        "timestamp": timestamp,
    });
    Datagram {
        payload: serde_json::to_vec(&payload).unwrap(),
        from: test_peer().addr,
    }
}

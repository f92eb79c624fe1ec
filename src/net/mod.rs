//! # Datagram Networking
//!
//! One UDP socket per process, one fixed peer. No handshake, no
//! acknowledgements, no retransmission: a lost datagram is a lost message.

pub mod listener;
pub mod transport;

pub use listener::spawn_listener;
pub use transport::{Datagram, PeerAddress, Transport, TransportError, UdpTransport, resolve_peer};

/// Port used for both the local bind and the peer address.
pub const CHAT_PORT: u16 = 9999;

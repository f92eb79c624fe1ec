use std::fmt;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use async_trait::async_trait;
use log::{debug, info};
use tokio::net::UdpSocket;

use crate::core::codec::MAX_DATAGRAM_SIZE;

/// Errors raised by the datagram transport.
///
/// `Resolve`, `NoAddress` and `Bind` only happen at startup and are fatal.
/// `Send` is tolerated by the controller; `Receive` stops the listener.
#[derive(Debug)]
pub enum TransportError {
    /// Host lookup failed.
    Resolve { host: String, source: io::Error },
    /// Host resolved to zero addresses.
    NoAddress(String),
    /// Could not bind the local socket (port in use, insufficient privileges).
    Bind { addr: SocketAddr, source: io::Error },
    Send(io::Error),
    Receive(io::Error),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Resolve { host, source } => {
                write!(f, "could not resolve {host}: {source}")
            }
            TransportError::NoAddress(host) => write!(f, "no address found for {host}"),
            TransportError::Bind { addr, source } => write!(f, "could not bind {addr}: {source}"),
            TransportError::Send(e) => write!(f, "send failed: {e}"),
            TransportError::Receive(e) => write!(f, "receive failed: {e}"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Resolve { source, .. } | TransportError::Bind { source, .. } => {
                Some(source)
            }
            TransportError::Send(e) | TransportError::Receive(e) => Some(e),
            TransportError::NoAddress(_) => None,
        }
    }
}

/// The single remote endpoint, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerAddress {
    /// Host string as given on the command line.
    pub host: String,
    pub addr: SocketAddr,
}

impl PeerAddress {
    pub fn new(host: impl Into<String>, addr: SocketAddr) -> Self {
        Self {
            host: host.into(),
            addr,
        }
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}

/// One completed receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    pub payload: Vec<u8>,
    pub from: SocketAddr,
}

/// A bound datagram endpoint.
///
/// `send_to` and `receive_one` take `&self` so one handle can be shared between
/// the send path and the listener task without locking.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one datagram. Fire-and-forget: `Ok` means the OS accepted it.
    async fn send_to(&self, payload: &[u8], peer: &PeerAddress) -> Result<usize, TransportError>;

    /// Wait for exactly one datagram. Must be called again to keep listening.
    async fn receive_one(&self) -> Result<Datagram, TransportError>;
}

/// Resolve `host:port` to a single peer address, preferring IPv4.
pub async fn resolve_peer(host: &str, port: u16) -> Result<PeerAddress, TransportError> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, port))
        .await
        .map_err(|source| TransportError::Resolve {
            host: host.to_string(),
            source,
        })?
        .collect();
    debug!("Resolved {} to {:?}", host, addrs);

    let addr = addrs
        .iter()
        .find(|a| a.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| TransportError::NoAddress(host.to_string()))?;

    Ok(PeerAddress::new(host, addr))
}

/// UDP socket bound to a wildcard address.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Bind the wildcard address matching `peer`'s family on `port`.
    pub async fn bind_for(peer: &PeerAddress, port: u16) -> Result<Self, TransportError> {
        let ip = match peer.addr.ip() {
            IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        };
        Self::bind(SocketAddr::new(ip, port)).await
    }

    pub async fn bind(addr: SocketAddr) -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| TransportError::Bind { addr, source })?;
        info!("Bound UDP socket on {}", addr);
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

#[async_trait]
impl Transport for UdpTransport {
    async fn send_to(&self, payload: &[u8], peer: &PeerAddress) -> Result<usize, TransportError> {
        self.socket
            .send_to(payload, peer.addr)
            .await
            .map_err(TransportError::Send)
    }

    async fn receive_one(&self) -> Result<Datagram, TransportError> {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        let (len, from) = self
            .socket
            .recv_from(&mut buf)
            .await
            .map_err(TransportError::Receive)?;
        buf.truncate(len);
        Ok(Datagram { payload: buf, from })
    }
}

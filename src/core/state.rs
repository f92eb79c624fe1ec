//! # Application State
//!
//! Core chat state. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! ChatState
//! ├── username: String              // sender name on outbound messages
//! ├── peer: PeerAddress             // fixed remote endpoint
//! ├── transcript: Transcript        // append-only chat log
//! ├── phase: Phase                  // Running | Terminating
//! ├── last_error: Option<String>    // receive failure (listening stopped)
//! ├── last_send_error: Option<String> // most recent failed send
//! ├── listening: bool               // listener still re-arming
//! └── stats: TrafficStats           // datagram counters
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::transcript::Transcript;
use crate::net::transport::PeerAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Quit was requested. No further events are processed.
    Terminating,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrafficStats {
    pub sent: u64,
    pub received: u64,
    /// Datagrams that failed to decode.
    pub dropped: u64,
    pub send_failures: u64,
}

#[derive(Debug)]
pub struct ChatState {
    pub username: String,
    pub peer: PeerAddress,
    pub transcript: Transcript,
    pub phase: Phase,
    pub last_error: Option<String>,
    pub last_send_error: Option<String>,
    pub listening: bool,
    pub stats: TrafficStats,
}

impl ChatState {
    pub fn new(username: String, peer: PeerAddress) -> Self {
        Self {
            username,
            peer,
            transcript: Transcript::new(),
            phase: Phase::Running,
            last_error: None,
            last_send_error: None,
            listening: true,
            stats: TrafficStats::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Short status text for the title bar.
    pub fn status_message(&self) -> String {
        if let Some(err) = &self.last_error {
            format!("Receive error: {err}")
        } else if let Some(err) = &self.last_send_error {
            format!("Send error: {err}")
        } else {
            format!("Connected to: {}", self.peer)
        }
    }
}

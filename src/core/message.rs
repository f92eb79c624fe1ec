//! # Chat Messages
//!
//! A `ChatMessage` is the unit that travels over the wire and lands in the
//! transcript. It is immutable once built: the constructor trims the text and
//! refuses anything that is empty after trimming.

use chrono::{DateTime, FixedOffset, Local};

/// Who authored a message, relative to this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Typed into this terminal.
    Local,
    /// Received from the peer.
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    sender: String,
    text: String,
    timestamp: DateTime<FixedOffset>,
}

impl ChatMessage {
    /// Build a message with an explicit timestamp.
    ///
    /// Returns `None` if `text` is empty or whitespace-only.
    pub fn new(
        sender: impl Into<String>,
        text: &str,
        timestamp: DateTime<FixedOffset>,
    ) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            sender: sender.into(),
            text: text.to_string(),
            timestamp,
        })
    }

    /// Build a message stamped with the local wall clock.
    pub fn now(sender: impl Into<String>, text: &str) -> Option<Self> {
        Self::new(sender, text, Local::now().fixed_offset())
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }
}

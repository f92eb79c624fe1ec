//! # Wire Codec
//!
//! One `ChatMessage` per datagram, encoded as a JSON object:
//!
//! ```text
//! {"sender":"alice","text":"hello","timestamp":"2024-01-01T12:00:00+02:00"}
//! ```
//!
//! The encoding is self-describing and knows nothing about datagram framing.
//! Timestamps are RFC 3339 with the sender's UTC offset preserved, so the
//! transcript shows the clock time the sender saw.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::core::message::ChatMessage;

/// Largest datagram the transport will read. Anything longer is truncated on
/// receive and will fail to decode.
pub const MAX_DATAGRAM_SIZE: usize = 1024;

#[derive(Serialize)]
struct OutboundPacket<'a> {
    sender: &'a str,
    text: &'a str,
    timestamp: DateTime<FixedOffset>,
}

#[derive(Deserialize)]
struct InboundPacket {
    sender: String,
    text: String,
    timestamp: DateTime<FixedOffset>,
}

#[derive(Debug)]
pub enum CodecError {
    /// Serialization failed.
    Encode(serde_json::Error),
    /// Bytes were not a well-formed packet (bad JSON, missing field, bad timestamp).
    Malformed(serde_json::Error),
    /// Packet parsed but carried no text.
    EmptyText,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Encode(e) => write!(f, "encode error: {e}"),
            CodecError::Malformed(e) => write!(f, "malformed packet: {e}"),
            CodecError::EmptyText => write!(f, "packet has empty text"),
        }
    }
}

impl std::error::Error for CodecError {}

pub fn encode(message: &ChatMessage) -> Result<Vec<u8>, CodecError> {
    let packet = OutboundPacket {
        sender: message.sender(),
        text: message.text(),
        timestamp: message.timestamp(),
    };
    serde_json::to_vec(&packet).map_err(CodecError::Encode)
}

pub fn decode(bytes: &[u8]) -> Result<ChatMessage, CodecError> {
    let packet: InboundPacket = serde_json::from_slice(bytes).map_err(CodecError::Malformed)?;
    ChatMessage::new(packet.sender, &packet.text, packet.timestamp).ok_or(CodecError::EmptyText)
}

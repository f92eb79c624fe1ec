//! # Transcript
//!
//! Ordered, append-only log of chat lines. Each line is formatted once, at
//! append time, into `[HH:MM:SS] sender: text`. Local and remote lines share
//! the same content format; the `origin` tag only drives styling.
//!
//! There is no eviction. The transcript grows for the whole session.

use std::fmt;

use crate::core::message::{ChatMessage, Origin};

/// Clock format used for the timestamp column.
const CLOCK_FORMAT: &str = "%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    /// `HH:MM:SS` in the sender's own UTC offset.
    pub clock: String,
    pub sender: String,
    pub text: String,
    pub origin: Origin,
}

impl TranscriptLine {
    pub fn from_message(message: &ChatMessage, origin: Origin) -> Self {
        Self {
            clock: message.timestamp().format(CLOCK_FORMAT).to_string(),
            sender: message.sender().to_string(),
            text: message.text().to_string(),
            origin,
        }
    }
}

impl fmt::Display for TranscriptLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.clock, self.sender, self.text)
    }
}

#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<TranscriptLine>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: &ChatMessage, origin: Origin) -> &TranscriptLine {
        self.lines.push(TranscriptLine::from_message(message, origin));
        &self.lines[self.lines.len() - 1]
    }

    pub fn render_all(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn last(&self) -> Option<&TranscriptLine> {
        self.lines.last()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

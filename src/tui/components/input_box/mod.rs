//! # InputBox Component
//!
//! Single-line message editor.
//!
//! ## Responsibilities
//!
//! - Capture text input up to the configured character limit
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Handle submission (Enter)
//! - Display the buffer, a placeholder when empty, and a character counter
//!
//! ## State Management
//!
//! The buffer is internal state and is the "pending input" half of the
//! application state. Cursor position and horizontal scroll live in
//! `CursorState`. Enter never inserts a newline; pasted newlines become spaces.

mod cursor;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

use cursor::{CursorState, next_char_boundary, prev_char_boundary};

pub const PLACEHOLDER: &str = "Type your message...";
const PROMPT: &str = "│ ";
/// Top border + one text row + bottom border.
pub const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted non-blank text (Enter pressed)
    Submit(String),
    /// Text content or cursor changed
    ContentChanged,
}

/// Text input component.
///
/// # Props
///
/// - `char_limit`: maximum number of characters accepted (from config)
///
/// # State
///
/// - `buffer`: Current text being typed
/// - `cursor`: Cursor position and horizontal scroll (see `CursorState`)
pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Maximum characters (Prop)
    pub char_limit: usize,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(char_limit: usize) -> Self {
        Self {
            buffer: String::new(),
            char_limit,
            cursor: CursorState::new(),
        }
    }

    fn char_count(&self) -> usize {
        self.buffer.chars().count()
    }

    fn remaining(&self) -> usize {
        self.char_limit.saturating_sub(self.char_count())
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        let accepted: String = text.chars().take(self.remaining()).collect();
        if accepted.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor.pos, &accepted);
        self.cursor.pos += accepted.len();
        Some(InputEvent::ContentChanged)
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let counter = format!(" {}/{} ", self.char_count(), self.char_limit);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme.border)
            .title_bottom(Line::styled(counter, theme.hint).right_aligned());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let prompt_width = PROMPT.chars().count() as u16;
        let [prompt_area, text_area] =
            Layout::horizontal([Constraint::Length(prompt_width), Constraint::Min(0)]).areas(inner);
        frame.render_widget(Paragraph::new(PROMPT).style(theme.border), prompt_area);

        if self.buffer.is_empty() {
            frame.render_widget(Paragraph::new(PLACEHOLDER).style(theme.hint), text_area);
        } else {
            self.cursor.update_scroll_offset(&self.buffer, text_area.width);
            let text = Paragraph::new(self.buffer.as_str())
                .style(theme.message)
                .scroll((0, self.cursor.scroll_offset));
            frame.render_widget(text, text_area);
        }

        if text_area.width > 0 && text_area.height > 0 {
            let column = self
                .cursor
                .visible_column(&self.buffer)
                .min(text_area.width.saturating_sub(1));
            frame.set_cursor_position((text_area.x + column, text_area.y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => {
                let flattened: String = text
                    .replace("\r\n", " ")
                    .chars()
                    .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
                    .collect();
                self.insert(&flattened)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(prev..self.cursor.pos);
                    self.cursor.pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor.pos != 0).then(|| {
                self.cursor.pos = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor.pos != self.buffer.len()).then(|| {
                self.cursor.pos = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => {
                if !self.buffer.trim().is_empty() {
                    let text = std::mem::take(&mut self.buffer);
                    self.cursor.reset();
                    Some(InputEvent::Submit(text))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

//! # TitleBar Component
//!
//! Top status bar: the banner, the connection/status text, and a "↓ New"
//! indicator when remote lines arrived below the current scroll position.
//!
//! Stateless. All three props come from different places:
//! - `status_message`: `ChatState::status_message()`
//! - `is_error`: whether a send or receive error is being reported
//! - `has_unseen_content`: transcript scroll state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub const BANNER: &str = "═══ VT100 CHAT ═══";

pub struct TitleBar {
    pub status_message: String,
    pub is_error: bool,
    pub has_unseen_content: bool,
}

impl TitleBar {
    pub fn new(status_message: String, is_error: bool, has_unseen_content: bool) -> Self {
        Self {
            status_message,
            is_error,
            has_unseen_content,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let status_style = if self.is_error {
            theme.error
        } else {
            theme.status
        };

        let mut spans = vec![
            Span::styled(format!(" {BANNER} "), theme.title),
            Span::raw(" "),
            Span::styled(self.status_message.clone(), status_style),
        ];
        if self.has_unseen_content {
            spans.push(Span::styled(" | ↓ New", theme.hint));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

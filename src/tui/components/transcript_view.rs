//! # TranscriptView Component
//!
//! Scrollable view of the chat transcript.
//!
//! ## Responsibilities
//!
//! - Display every transcript line as `[HH:MM:SS] sender: text`
//! - Wrap long messages with a hanging indent under the text column
//! - Follow the bottom while pinned; stay put (and flag unseen lines) while
//!   the user is scrolled back
//! - Show the waiting placeholder and the receive-error banner
//!
//! ## Architecture
//!
//! `TranscriptView` is a transient component (created each frame) that wraps
//! `&'a mut TranscriptViewState` (persistent state) and the transcript (props).

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::UnicodeWidthStr;

use crate::core::transcript::{Transcript, TranscriptLine};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

pub const WAITING_PLACEHOLDER: &str = "Connected. Waiting for messages...";
/// Narrowest text column that still gets a hanging indent.
const MIN_TEXT_WIDTH: usize = 10;
/// Column kept free for the vertical scrollbar.
const SCROLLBAR_WIDTH: u16 = 1;

/// Scroll state for the transcript.
/// Must be persisted in the parent TuiState.
pub struct TranscriptViewState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Total wrapped height of the transcript at the last render
    pub total_height: u16,
    /// Transcript length at the last render
    total_lines: usize,
    /// Transcript length the user has seen while pinned to the bottom
    seen_lines: usize,
}

impl Default for TranscriptViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptViewState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
            total_height: 0,
            total_lines: 0,
            seen_lines: 0,
        }
    }

    /// True when lines arrived below the viewport while scrolled back.
    ///
    /// Counted in transcript lines, not wrapped rows, so a resize that
    /// rewraps old lines does not count as new content.
    pub fn has_unseen_content(&self) -> bool {
        !self.stick_to_bottom && self.total_lines > self.seen_lines
    }

    /// Re-pin to the bottom (after a local submit or Ctrl+End).
    pub fn scroll_to_bottom(&mut self) {
        self.stick_to_bottom = true;
        self.scroll_state.scroll_to_bottom();
    }

    fn max_offset(&self) -> u16 {
        self.total_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for TranscriptViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => self.scroll_to_bottom(),
            _ => {}
        }
        None
    }
}

/// Wrap one transcript line into styled rows for a column `width` cells wide.
///
/// The `[clock] sender: ` prefix sits on the first row and continuation rows
/// are indented to the text column. Columns too narrow for that put the
/// prefix on its own row.
pub fn wrap_line(line: &TranscriptLine, width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let clock = format!("[{}] ", line.clock);
    let sender = format!("{}: ", line.sender);
    let indent_width = clock.width() + sender.width();
    let prefix = vec![
        Span::styled(clock, theme.timestamp),
        Span::styled(sender, theme.sender(line.origin)),
    ];

    if width < indent_width + MIN_TEXT_WIDTH {
        let options = textwrap::Options::new(width).break_words(true);
        let mut rows = vec![Line::from(prefix)];
        rows.extend(
            textwrap::wrap(&line.text, options)
                .into_iter()
                .map(|row| Line::from(Span::styled(row.into_owned(), theme.message))),
        );
        return rows;
    }

    let indent = " ".repeat(indent_width);
    let options = textwrap::Options::new(width)
        .initial_indent(&indent)
        .subsequent_indent(&indent)
        .break_words(true);

    textwrap::wrap(&line.text, options)
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let body = row.get(indent_width..).unwrap_or_default().to_string();
            let mut spans = if i == 0 {
                prefix.clone()
            } else {
                vec![Span::raw(indent.clone())]
            };
            spans.push(Span::styled(body, theme.message));
            Line::from(spans)
        })
        .collect()
}

/// Scrollable transcript component.
/// Created fresh each frame with references to state and data.
pub struct TranscriptView<'a> {
    pub state: &'a mut TranscriptViewState,
    pub transcript: &'a Transcript,
    /// Receive error to show in the border; `None` while listening normally
    pub receive_error: Option<&'a str>,
}

impl<'a> TranscriptView<'a> {
    pub fn new(
        state: &'a mut TranscriptViewState,
        transcript: &'a Transcript,
        receive_error: Option<&'a str>,
    ) -> Self {
        Self {
            state,
            transcript,
            receive_error,
        }
    }

    fn block(&self, theme: &Theme) -> Block<'static> {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(theme.border);
        match self.receive_error {
            Some(err) => block.title(Line::styled(
                format!(" Not receiving: {err} "),
                theme.error,
            )),
            None => block,
        }
    }
}

impl<'a> Component for TranscriptView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = self.block(theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.state.total_lines = self.transcript.len();

        if self.transcript.is_empty() {
            self.state.total_height = 0;
            self.state.viewport_height = inner.height;
            let placeholder = Paragraph::new(WAITING_PLACEHOLDER).style(theme.hint);
            frame.render_widget(placeholder, inner);
            return;
        }

        // 1. Measure every line at the current width
        let content_width = inner.width.saturating_sub(SCROLLBAR_WIDTH);
        let rows: Vec<Vec<Line<'static>>> = self
            .transcript
            .lines()
            .iter()
            .map(|line| wrap_line(line, content_width, theme))
            .collect();
        let total_height = rows
            .iter()
            .map(|r| r.len())
            .sum::<usize>()
            .min(u16::MAX as usize) as u16;

        self.state.total_height = total_height;
        self.state.viewport_height = inner.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        // 2. Lay the rows out on the scroll canvas
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for line_rows in rows {
            let height = line_rows.len() as u16;
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Paragraph::new(line_rows), rect);
            y_offset = y_offset.saturating_add(height);
        }

        // 3. Follow the bottom while pinned
        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
            self.state.seen_lines = self.transcript.len();
        }

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::theme::Theme;

/// A reusable UI component.
///
/// Components receive data via props (struct fields), may hold internal
/// state, and render to a `Frame` within a given `Rect`. The theme is passed
/// on every call rather than stored, so there is exactly one copy of it.
///
/// `render` takes `&mut self` so components can update presentation state
/// (scroll offsets, cursor position) during the render pass, in line with
/// ratatui's `StatefulWidget` pattern.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}

/// A component that handles terminal events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}

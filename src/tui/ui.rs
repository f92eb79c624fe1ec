use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};

use crate::core::state::ChatState;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::input_box::INPUT_HEIGHT;
use crate::tui::components::{TitleBar, TranscriptView};
use crate::tui::theme::Theme;

pub const INPUT_LABEL: &str = "┌─ INPUT ─";
pub const FOOTER_HINT: &str = "ESC/Ctrl+C: quit • ENTER: send";

/// Render one full frame: title, transcript, input label, input box, footer.
pub fn draw_ui(frame: &mut Frame, state: &ChatState, tui: &mut TuiState, theme: &Theme) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([
        Length(1),
        Length(1),
        Min(0),
        Length(1),
        Length(1),
        Length(INPUT_HEIGHT),
        Length(1),
    ]);
    let [title_area, _, transcript_area, _, label_area, input_area, footer_area] =
        layout.areas(frame.area());

    // Transcript first so the title bar sees this frame's unseen-content flag
    TranscriptView::new(
        &mut tui.transcript_view,
        &state.transcript,
        state.last_error.as_deref(),
    )
    .render(frame, transcript_area, theme);

    let is_error = state.last_error.is_some() || state.last_send_error.is_some();
    TitleBar::new(
        state.status_message(),
        is_error,
        tui.transcript_view.has_unseen_content(),
    )
    .render(frame, title_area, theme);

    frame.render_widget(Span::styled(INPUT_LABEL, theme.input_label), label_area);
    tui.input_box.render(frame, input_area, theme);
    frame.render_widget(Line::styled(FOOTER_HINT, theme.hint).centered(), footer_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{remote_datagram, test_state};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(state: &ChatState, tui: &mut TuiState) -> Vec<String> {
        let (width, height) = (70, 16);
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw_ui(f, state, tui, &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn test_fresh_screen_layout() {
        let state = test_state();
        let mut tui = TuiState::new(280);
        let rows = render(&state, &mut tui);

        assert!(rows[0].contains("VT100 CHAT"));
        assert!(rows[0].contains("Connected to: 100.64.0.2:9999"));
        assert!(rows.iter().any(|r| r.contains("Connected. Waiting for messages...")));
        assert!(rows.iter().any(|r| r.contains(INPUT_LABEL)));
        assert!(rows.iter().any(|r| r.contains("Type your message...")));
        assert!(rows[15].contains(FOOTER_HINT));
    }

    #[test]
    fn test_remote_line_is_rendered() {
        let mut state = test_state();
        update(
            &mut state,
            Action::DatagramReceived(remote_datagram("hi", "2024-01-01T00:00:00Z")),
        );
        let mut tui = TuiState::new(280);
        let rows = render(&state, &mut tui);

        assert!(rows.iter().any(|r| r.contains("[00:00:00] bob: hi")));
    }

    #[test]
    fn test_receive_error_is_visible() {
        let mut state = test_state();
        update(&mut state, Action::ReceiveFailed("connection refused".to_string()));
        let mut tui = TuiState::new(280);
        let rows = render(&state, &mut tui);

        assert!(rows[0].contains("Receive error: connection refused"));
        assert!(rows.iter().any(|r| r.contains("Not receiving: connection refused")));
    }

    #[test]
    fn test_pending_input_is_rendered() {
        let state = test_state();
        let mut tui = TuiState::new(280);
        tui.input_box.buffer = "draft".to_string();
        let rows = render(&state, &mut tui);

        assert!(rows.iter().any(|r| r.contains("│ draft")));
        assert!(rows.iter().any(|r| r.contains("5/280")));
    }
}

//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into core `Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Three producer tasks feed one ordered queue:
//!
//! - the keyboard reader (`event::spawn_input_reader`), posting `TuiEvent`s
//! - the UDP listener (`net::spawn_listener`), posting network `Action`s
//! - the interrupt watcher (`event::spawn_interrupt_watcher`), posting `Quit`
//!   when SIGINT arrives from outside the terminal
//!
//! The loop owns the `Controller` and applies queued events strictly one at a
//! time in arrival order, redrawing after each one before taking the next.
//! Nothing else touches the state, so no locking is needed.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
pub mod theme;
mod ui;

use log::info;
use std::io::stdout;
use std::sync::Arc;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::sync::mpsc;

use crate::controller::{Controller, Flow};
use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::net::listener::spawn_listener;
use crate::net::transport::Transport;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, TranscriptViewState};
use crate::tui::event::{LoopEvent, TuiEvent, spawn_input_reader, spawn_interrupt_watcher};
use crate::tui::theme::Theme;

/// TUI-specific presentation state (not part of core chat logic)
pub struct TuiState {
    // Persistent component states
    pub transcript_view: TranscriptViewState,
    pub input_box: InputBox,
}

impl TuiState {
    pub fn new(char_limit: usize) -> Self {
        Self {
            transcript_view: TranscriptViewState::new(),
            input_box: InputBox::new(char_limit),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Apply one terminal event to the presentation state.
///
/// Returns the core action it stands for, if any. Editing and scrolling stay
/// inside the TUI; only Enter (with non-blank input) and quit reach the core.
fn route_terminal_event(tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Quit => Some(Action::Quit),
        TuiEvent::Resize => None,
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.transcript_view.handle_event(&event);
            None
        }
        _ => match tui.input_box.handle_event(&event)? {
            InputEvent::Submit(text) => {
                // Own messages always bring the view back to the bottom
                tui.transcript_view.scroll_to_bottom();
                Some(Action::Submit(text))
            }
            InputEvent::ContentChanged => None,
        },
    }
}

/// Run the chat screen until the user quits.
///
/// `transport` is the same handle the controller sends on; the listener gets
/// its own clone and is aborted on the way out so the socket is released.
pub async fn run<T: Transport + 'static>(
    mut controller: Controller<T>,
    transport: Arc<T>,
    config: &ResolvedConfig,
) -> std::io::Result<()> {
    let theme = Theme::from_config(&config.theme);
    let mut tui = TuiState::new(config.char_limit);

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();

    let (tx, rx) = mpsc::unbounded_channel();
    let network_tx = tx.clone();
    let listener = spawn_listener(transport, move |action| {
        network_tx.send(LoopEvent::Network(action)).is_ok()
    });
    let interrupt_tx = tx.clone();
    let interrupt_watcher = spawn_interrupt_watcher(move |event| {
        interrupt_tx.send(LoopEvent::Terminal(event)).is_ok()
    });
    let input_reader = spawn_input_reader(move |event| tx.send(LoopEvent::Terminal(event)).is_ok());

    let result = event_loop(&mut terminal, &mut controller, &mut tui, &theme, rx).await;

    listener.abort();
    input_reader.abort();
    interrupt_watcher.abort();
    drop(controller);
    drop(terminal_mode_guard);
    ratatui::restore();
    info!("Terminal restored");
    result
}

/// Apply queued events one at a time, redrawing after each.
///
/// Returns once the controller reports `Flow::Quit` or every producer has
/// gone away. Events still queued behind a quit are never applied.
async fn event_loop<B: Backend, T: Transport>(
    terminal: &mut Terminal<B>,
    controller: &mut Controller<T>,
    tui: &mut TuiState,
    theme: &Theme,
    mut rx: mpsc::UnboundedReceiver<LoopEvent>,
) -> Result<(), B::Error> {
    terminal.draw(|f| ui::draw_ui(f, controller.state(), tui, theme))?;

    while let Some(event) = rx.recv().await {
        let action = match event {
            LoopEvent::Terminal(tui_event) => route_terminal_event(tui, tui_event),
            LoopEvent::Network(action) => Some(action),
        };
        if let Some(action) = action {
            if controller.handle(action).await == Flow::Quit {
                return Ok(());
            }
        }

        terminal.draw(|f| ui::draw_ui(f, controller.state(), tui, theme))?;
    }

    Ok(())
}

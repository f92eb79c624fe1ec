use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::core::action::Action;

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Core actions (passed to core::update)
    Quit,
    Submit,

    // TUI-local events (handled directly in TUI)
    InputChar(char),
    Paste(String), // Bracketed paste
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToBottom, // Ctrl+End - also re-enables stick-to-bottom
    Resize,
}

/// Everything the event loop consumes, from every producer, on one queue.
#[derive(Debug)]
pub enum LoopEvent {
    Terminal(TuiEvent),
    Network(Action),
}

/// Translate a raw crossterm event. `None` for events the chat ignores.
pub fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => map_key(key_event),
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Only presses; release/repeat reports would double every keystroke
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (m, KeyCode::Char('c' | 'C')) if m.contains(KeyModifiers::CONTROL) => Some(TuiEvent::Quit),
        (m, KeyCode::End) if m.contains(KeyModifiers::CONTROL) => Some(TuiEvent::ScrollToBottom),
        (m, KeyCode::Char(_)) if m.contains(KeyModifiers::CONTROL) => None,
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Esc) => Some(TuiEvent::Quit),
        (_, KeyCode::Enter) => Some(TuiEvent::Submit),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        (_, KeyCode::Up) => Some(TuiEvent::ScrollUp),
        (_, KeyCode::Down) => Some(TuiEvent::ScrollDown),
        (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
        (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}

/// Spawn the keyboard producer.
///
/// Reads the terminal event stream and hands each mapped event to `post`,
/// which returns `false` once the event loop has gone away.
pub fn spawn_input_reader<F>(post: F) -> JoinHandle<()>
where
    F: Fn(TuiEvent) -> bool + Send + 'static,
{
    tokio::spawn(async move {
        let mut events = EventStream::new();
        while let Some(next) = events.next().await {
            match next {
                Ok(event) => {
                    if let Some(tui_event) = map_event(event) {
                        if !post(tui_event) {
                            return;
                        }
                    }
                }
                Err(e) => {
                    warn!("Terminal input failed: {}", e);
                    let _ = post(TuiEvent::Quit);
                    return;
                }
            }
        }
        debug!("Terminal event stream ended");
    })
}

/// Spawn the interrupt producer.
///
/// Raw mode turns the Ctrl+C key into an ordinary key event, but a SIGINT
/// sent from outside (`kill -INT`) still arrives as a signal. Either way the
/// loop sees the same `Quit` and restores the terminal on the way out.
pub fn spawn_interrupt_watcher<F>(post: F) -> JoinHandle<()>
where
    F: Fn(TuiEvent) -> bool + Send + 'static,
{
    spawn_quit_on(tokio::signal::ctrl_c(), post)
}

/// Post `Quit` once `signal` resolves successfully.
fn spawn_quit_on<S, F>(signal: S, post: F) -> JoinHandle<()>
where
    S: Future<Output = std::io::Result<()>> + Send + 'static,
    F: Fn(TuiEvent) -> bool + Send + 'static,
{
    tokio::spawn(async move {
        match signal.await {
            Ok(()) => {
                info!("Interrupt received, quitting");
                let _ = post(TuiEvent::Quit);
            }
            Err(e) => warn!("Could not listen for interrupts: {}", e),
        }
    })
}

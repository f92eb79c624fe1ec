//! # Actions
//!
//! Everything that can happen in the chat becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! A datagram arrives? That's `Action::DatagramReceived(datagram)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing the I/O the caller must perform.
//! No sockets here. Sending happens in the controller.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! | Phase       | Action                  | Result                                  |
//! |-------------|-------------------------|-----------------------------------------|
//! | Running     | Quit                    | → Terminating, `Effect::Quit`           |
//! | Running     | Submit (non-blank)      | local line appended, `Effect::Send`     |
//! | Running     | Submit (blank)          | nothing                                 |
//! | Running     | DatagramReceived (ok)   | remote line appended                    |
//! | Running     | DatagramReceived (bad)  | dropped, counted                        |
//! | Running     | ReceiveFailed           | `last_error` set, listening stops       |
//! | Running     | SendFailed              | `last_send_error` set, counted          |
//! | Terminating | anything                | ignored                                 |

use log::{debug, info, warn};

use crate::core::codec;
use crate::core::message::{ChatMessage, Origin};
use crate::core::state::{ChatState, Phase};
use crate::net::transport::Datagram;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Commit the buffered input line.
    Submit(String),
    /// Esc / Ctrl+C.
    Quit,
    DatagramReceived(Datagram),
    /// The listener's receive failed; it will not re-arm.
    ReceiveFailed(String),
    /// An outbound send was rejected by the socket.
    SendFailed(String),
    /// A send went through.
    SendSucceeded,
}

/// I/O the caller must perform after `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Encode and send this message to the peer.
    Send(ChatMessage),
    /// Release the transport and leave the event loop.
    Quit,
}

pub fn update(state: &mut ChatState, action: Action) -> Effect {
    if state.phase == Phase::Terminating {
        debug!("Ignoring {:?} while terminating", action);
        return Effect::None;
    }

    match action {
        Action::Quit => {
            info!("Quit requested");
            state.phase = Phase::Terminating;
            Effect::Quit
        }
        Action::Submit(text) => {
            let Some(message) = ChatMessage::now(state.username.clone(), &text) else {
                return Effect::None;
            };
            state.transcript.append(&message, Origin::Local);
            Effect::Send(message)
        }
        Action::DatagramReceived(datagram) => {
            match codec::decode(&datagram.payload) {
                Ok(message) => {
                    state.stats.received += 1;
                    state.transcript.append(&message, Origin::Remote);
                }
                Err(e) => {
                    state.stats.dropped += 1;
                    debug!("Dropping datagram from {}: {}", datagram.from, e);
                }
            }
            Effect::None
        }
        Action::ReceiveFailed(reason) => {
            warn!("Inbound listening stopped: {}", reason);
            state.listening = false;
            state.last_error = Some(reason);
            Effect::None
        }
        Action::SendFailed(reason) => {
            warn!("Send to {} failed: {}", state.peer, reason);
            state.stats.send_failures += 1;
            state.last_send_error = Some(reason);
            Effect::None
        }
        Action::SendSucceeded => {
            state.stats.sent += 1;
            state.last_send_error = None;
            Effect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{remote_datagram, test_state};

    #[test]
    fn test_submit_appends_local_line_and_sends() {
        let mut state = test_state();
        let effect = update(&mut state, Action::Submit("  hello  ".to_string()));

        let Effect::Send(message) = effect else {
            panic!("expected Effect::Send, got {effect:?}");
        };
        assert_eq!(message.sender(), "alice");
        assert_eq!(message.text(), "hello");

        assert_eq!(state.transcript.len(), 1);
        let line = &state.transcript.lines()[0];
        assert_eq!(line.origin, Origin::Local);
        assert!(line.to_string().ends_with("] alice: hello"));
        assert!(line.to_string().starts_with('['));
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut state = test_state();
        for text in ["", " ", "\t\n  "] {
            assert_eq!(update(&mut state, Action::Submit(text.to_string())), Effect::None);
        }
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn test_remote_datagram_appends_remote_line() {
        let mut state = test_state();
        let effect = update(
            &mut state,
            Action::DatagramReceived(remote_datagram("hi", "2024-01-01T00:00:00Z")),
        );
        assert_eq!(effect, Effect::None);
        assert_eq!(state.transcript.render_all(), vec!["[00:00:00] bob: hi".to_string()]);
        assert_eq!(state.transcript.lines()[0].origin, Origin::Remote);
        assert_eq!(state.stats.received, 1);
    }

    #[test]
    fn test_malformed_datagram_is_dropped() {
        let mut state = test_state();
        let datagram = Datagram {
            payload: b"{\"sender\":".to_vec(),
            from: "10.0.0.9:9999".parse().unwrap(),
        };
        assert_eq!(update(&mut state, Action::DatagramReceived(datagram)), Effect::None);
        assert!(state.transcript.is_empty());
        assert_eq!(state.stats.dropped, 1);
        assert!(state.listening);
        assert!(state.last_error.is_none());

        // Still accepting afterwards
        update(
            &mut state,
            Action::DatagramReceived(remote_datagram("after", "2024-01-01T00:00:05Z")),
        );
        assert_eq!(state.transcript.len(), 1);
    }

    #[test]
    fn test_receive_failure_degrades_but_keeps_running() {
        let mut state = test_state();
        update(&mut state, Action::ReceiveFailed("connection reset".to_string()));
        assert!(state.is_running());
        assert!(!state.listening);
        assert_eq!(state.last_error.as_deref(), Some("connection reset"));

        // Local sends still work
        assert!(matches!(
            update(&mut state, Action::Submit("still here".to_string())),
            Effect::Send(_)
        ));
    }

    #[test]
    fn test_send_failure_is_recorded_and_cleared() {
        let mut state = test_state();
        update(&mut state, Action::SendFailed("no route".to_string()));
        assert_eq!(state.last_send_error.as_deref(), Some("no route"));
        assert_eq!(state.stats.send_failures, 1);

        update(&mut state, Action::SendSucceeded);
        assert!(state.last_send_error.is_none());
        assert_eq!(state.stats.sent, 1);
    }

    #[test]
    fn test_quit_then_everything_ignored() {
        let mut state = test_state();
        assert_eq!(update(&mut state, Action::Quit), Effect::Quit);
        assert_eq!(state.phase, Phase::Terminating);

        assert_eq!(update(&mut state, Action::Submit("late".to_string())), Effect::None);
        assert_eq!(
            update(
                &mut state,
                Action::DatagramReceived(remote_datagram("late", "2024-01-01T00:00:00Z"))
            ),
            Effect::None
        );
        assert_eq!(update(&mut state, Action::Quit), Effect::None);
        assert!(state.transcript.is_empty());
        assert_eq!(state.stats.received, 0);
    }

    #[test]
    fn test_transcript_length_never_decreases() {
        let mut state = test_state();
        let actions = vec![
            Action::Submit("one".to_string()),
            Action::DatagramReceived(remote_datagram("two", "2024-01-01T00:00:00Z")),
            Action::Submit("   ".to_string()),
            Action::DatagramReceived(Datagram {
                payload: b"junk".to_vec(),
                from: "10.0.0.9:1".parse().unwrap(),
            }),
            Action::SendFailed("x".to_string()),
            Action::ReceiveFailed("y".to_string()),
            Action::Submit("three".to_string()),
        ];

        let mut previous = state.transcript.render_all();
        for action in actions {
            update(&mut state, action);
            let current = state.transcript.render_all();
            assert!(current.len() >= previous.len());
            assert_eq!(&current[..previous.len()], &previous[..]);
            previous = current;
        }
        assert_eq!(previous.len(), 3);
    }
}

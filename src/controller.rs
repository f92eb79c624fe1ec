//! # Controller
//!
//! Owns the `ChatState` and the transport handle. Each call to `handle` runs
//! one action through `update()` and then performs the resulting effect:
//! sending a message, or releasing the transport on quit. Send outcomes are
//! fed back through `update()` so the state stays the single source of truth.
//!
//! The controller is driven one action at a time by the event loop in `tui`,
//! so there is never more than one writer to the state.

use std::sync::Arc;

use log::{debug, info};

use crate::core::action::{Action, Effect, update};
use crate::core::codec;
use crate::core::message::ChatMessage;
use crate::core::state::ChatState;
use crate::net::transport::Transport;

/// Whether the event loop should keep going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Controller<T: Transport> {
    state: ChatState,
    transport: Option<Arc<T>>,
}

impl<T: Transport> Controller<T> {
    pub fn new(state: ChatState, transport: Arc<T>) -> Self {
        Self {
            state,
            transport: Some(transport),
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    /// True until quit releases the transport.
    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    pub async fn handle(&mut self, action: Action) -> Flow {
        match update(&mut self.state, action) {
            Effect::None => self.flow(),
            Effect::Send(message) => {
                let outcome = self.send(&message).await;
                update(&mut self.state, outcome);
                self.flow()
            }
            Effect::Quit => {
                if self.transport.take().is_some() {
                    info!("Transport released");
                }
                info!("Session traffic: {:?}", self.state.stats);
                Flow::Quit
            }
        }
    }

    fn flow(&self) -> Flow {
        if self.state.is_running() {
            Flow::Continue
        } else {
            Flow::Quit
        }
    }

    async fn send(&self, message: &ChatMessage) -> Action {
        let Some(transport) = &self.transport else {
            return Action::SendFailed("transport closed".to_string());
        };
        let payload = match codec::encode(message) {
            Ok(payload) => payload,
            Err(e) => return Action::SendFailed(e.to_string()),
        };
        if payload.len() > codec::MAX_DATAGRAM_SIZE {
            debug!(
                "Outbound packet is {} bytes; peer will truncate to {}",
                payload.len(),
                codec::MAX_DATAGRAM_SIZE
            );
        }
        match transport.send_to(&payload, &self.state.peer).await {
            Ok(len) => {
                debug!("Sent {} bytes to {}", len, self.state.peer);
                Action::SendSucceeded
            }
            Err(e) => Action::SendFailed(e.to_string()),
        }
    }
}

//! Perpetually re-armed receive loop.
//!
//! `receive_one` yields a single datagram, so the listener is a task that
//! issues the next receive as soon as the previous one completes and hands
//! each result to the controller's queue. It stops after the first transport
//! error (the controller records it) or when the queue is gone.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::core::action::Action;
use crate::net::transport::Transport;

/// Spawn the listener.
///
/// `post` forwards an action to the controller and returns `false` once the
/// receiving side has been dropped.
pub fn spawn_listener<T, F>(transport: Arc<T>, post: F) -> JoinHandle<()>
where
    T: Transport + 'static,
    F: Fn(Action) -> bool + Send + 'static,
{
    tokio::spawn(async move {
        info!("Listener started");
        let mut received = 0u64;
        loop {
            match transport.receive_one().await {
                Ok(datagram) => {
                    received += 1;
                    debug!(
                        "Datagram #{} from {} ({} bytes)",
                        received,
                        datagram.from,
                        datagram.payload.len()
                    );
                    if !post(Action::DatagramReceived(datagram)) {
                        debug!("Listener queue closed, stopping");
                        return;
                    }
                }
                Err(e) => {
                    warn!("Listener stopping after receive error: {}", e);
                    let _ = post(Action::ReceiveFailed(e.to_string()));
                    return;
                }
            }
        }
    })
}

//! # Core Chat Logic
//!
//! This module contains the chat's business logic.
//! It knows nothing about any specific UI technology or socket.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ChatState            │
//!                    │  • Action / update()    │
//!                    │  • Codec, Transcript    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │ Controller │──send_to────▶│  Transport │
//!           │            │◀─Datagram────│   (UDP)    │
//!           └─────┬──────┘              └────────────┘
//!                 │ snapshot
//!                 ▼
//!           ┌────────────┐
//!           │    TUI     │
//!           │ (ratatui)  │
//!           └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `ChatState`, everything the controller owns
//! - [`action`]: `Action` / `Effect` and the `update()` reducer
//! - [`message`]: `ChatMessage` and `Origin`
//! - [`codec`]: JSON wire encoding, one message per datagram
//! - [`transcript`]: append-only log of formatted lines
//! - [`config`]: `~/.vtchat/config.toml` loading and resolution

pub mod action;
pub mod codec;
pub mod config;
pub mod message;
pub mod state;
pub mod transcript;

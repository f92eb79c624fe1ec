//! # TUI Components
//!
//! This module contains all UI components for the chat screen.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: banner plus connection status and the "new lines" marker
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: single-line editor with character limit and counter
//! - `TranscriptView`: scrollable transcript; its persistent half is
//!   `TranscriptViewState`, which lives in `TuiState`
//!
//! Components receive external data as props (struct fields or constructor
//! arguments), never by reaching into `ChatState` themselves.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs        (Top status bar)
//! ├── transcript_view.rs  (Scrollable transcript)
//! └── input_box/          (Message editor)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod input_box;
pub use input_box::{InputBox, InputEvent};
pub mod transcript_view;
pub use transcript_view::{TranscriptView, TranscriptViewState};

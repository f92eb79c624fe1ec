//! vtchat library exports for the binary and integration tests

pub mod controller;
pub mod core;
pub mod net;
pub mod tui;

#[cfg(test)]
pub mod test_support;

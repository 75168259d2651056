//! Keyboard handling for game controls.

pub mod handler;

pub use handler::{handle_key_event, should_quit, AccelHold, Command};

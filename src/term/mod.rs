//! Terminal rendering layer.
//!
//! Renders into a simple framebuffer that is flushed to the terminal each
//! frame, keeping `core` free of any I/O.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;

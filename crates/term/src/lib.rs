//! Terminal rendering for the dictation game.
//!
//! Frames are drawn into a plain framebuffer by [`GameView`] (pure, testable)
//! and flushed to the terminal by [`TerminalRenderer`], which only re-emits
//! cells that changed since the last frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_dictation_core as core;
pub use tui_dictation_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, UiState, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

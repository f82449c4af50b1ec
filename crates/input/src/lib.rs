//! Terminal input module.
//!
//! Independent of any UI framework. It maps `crossterm` key events into
//! [`crate::types::GameAction`], tracks the keypad cursor used for arrow-key
//! play, and edits custom codes.

pub mod cursor;
pub mod entry;
pub mod map;

pub use tui_dictation_types as types;

pub use cursor::KeypadCursor;
pub use entry::{CodeEntry, EntryOutcome};
pub use map::{handle_key_event, should_quit, slot_for_key};

//! TUI Dictation (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches share `tui_dictation::{core,input,speech,term,types}`.

pub use tui_dictation_core as core;
pub use tui_dictation_input as input;
pub use tui_dictation_speech as speech;
pub use tui_dictation_term as term;
pub use tui_dictation_types as types;

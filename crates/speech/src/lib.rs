//! Speech module - the "speak the code" capability
//!
//! The session never talks to audio directly. It issues an announcement
//! (ticket + text); this crate speaks the text and reports the outcome so the
//! game loop can call `GameSession::finish_announcement`.
//!
//! # Engines
//!
//! - **Command**: an external TTS program. Auto-detected from `PATH` in this
//!   order: `espeak-ng`, `espeak`, `say`, `spd-say`
//! - **Silent**: waits about as long as speaking would take (`--mute`)
//! - **Unavailable**: nothing usable; every request reports `Unsupported`
//!
//! Every request runs under a timeout so a hung engine cannot leave the
//! session announcing forever.
//!
//! # Runtime
//!
//! [`SpeechBridge`] owns a small tokio runtime. Requests are spawned onto it
//! and completions come back over an mpsc channel drained with
//! [`SpeechBridge::try_recv`] from the game loop.

pub mod bridge;
pub mod engine;
pub mod error;

pub use tui_dictation_core as core;
pub use tui_dictation_types as types;

pub use bridge::{SpeechBridge, SpeechReport};
pub use engine::{CommandSpeaker, SpeechConfig, SpeechEngine, KNOWN_PROGRAMS};
pub use error::SpeechError;

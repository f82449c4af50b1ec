//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the memorization game's rules and state machine.
//! It has **zero dependencies** on terminals, audio, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical secrets and keypads
//! - **Testable**: Every transition is a plain method call
//! - **Portable**: Any front end can drive it (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`session`]: `GameSession`, the idle → announcing → collecting state machine
//! - [`keypad`]: 3x4 telephone keypad layout with Fisher-Yates shuffling
//! - [`secret`]: secret generation, parsing and speech text
//! - [`config`]: settings and their validation
//! - [`rng`]: seeded LCG
//! - [`error`]: recoverable session errors
//! - [`snapshot`]: render-ready view of a session
//!
//! # Game Rules
//!
//! - The secret has 3-8 digits, random unless a custom one is pinned
//! - The keypad only accepts digits after the code has been spoken
//! - A wrong full-length attempt costs one attempt; running out ends the round
//! - A correct attempt resets attempts, draws a new secret and (by policy)
//!   reshuffles the keypad
//!
//! # Example
//!
//! ```
//! use tui_dictation_core::{GameConfig, GameSession};
//! use tui_dictation_types::{GameEvent, Phase, ShuffleFrequency};
//!
//! let config = GameConfig::new(4, 3, ShuffleFrequency::Never).with_custom_secret("1234");
//! let mut session = GameSession::with_config(config, 42).unwrap();
//!
//! // Speak the code, then report that speech finished.
//! let announcement = session.announce().unwrap();
//! session.finish_announcement(announcement.ticket, Ok(()));
//! assert_eq!(session.phase(), Phase::Collecting);
//!
//! // Canonical layout: slots 0, 1, 2, 3 hold 1, 2, 3, 4.
//! for slot in 0..4 {
//!     session.press_slot(slot);
//! }
//! assert!(session.take_events().contains(&GameEvent::Success));
//! ```
//!
//! # Timing
//!
//! Deferred transitions (clearing a reviewed attempt, ending an overlay, auto
//! replay) are driven by [`GameSession::tick`](session::GameSession::tick),
//! called every frame with the elapsed milliseconds.

pub mod config;
pub mod error;
pub mod keypad;
pub mod rng;
pub mod secret;
pub mod session;
pub mod snapshot;

pub use tui_dictation_types as types;

// Re-export commonly used types for convenience
pub use config::GameConfig;
pub use error::{GameError, GameResult};
pub use keypad::KeypadLayout;
pub use rng::SimpleRng;
pub use secret::{DigitBuf, Secret};
pub use session::{Announcement, GameSession, Notice};
pub use snapshot::SessionSnapshot;

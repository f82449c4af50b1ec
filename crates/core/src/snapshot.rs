//! Render-ready view of a session.

use crate::keypad::KeypadLayout;
use crate::secret::DigitBuf;
use crate::types::{MessageKind, Overlay, Phase, ShuffleFrequency, SpeechLanguage};

/// Everything the presentation layer needs to draw one frame.
///
/// The secret itself is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub message: String,
    pub message_kind: MessageKind,
    pub length: u8,
    /// Live input, or the attempt being reviewed right after evaluation.
    pub entered: DigitBuf,
    pub remaining_attempts: u8,
    pub max_attempts: u8,
    pub layout: KeypadLayout,
    pub overlay: Option<Overlay>,
    pub shuffle: ShuffleFrequency,
    pub auto_replay: bool,
    pub replay_pending: bool,
    pub custom_pinned: bool,
    pub language: SpeechLanguage,
    pub rounds_won: u32,
}

impl SessionSnapshot {
    pub fn keypad_active(&self) -> bool {
        self.phase.accepts_input()
    }

    /// Attempt counter is shown only once the player has lost an attempt
    /// and still has some left.
    pub fn show_attempts(&self) -> bool {
        self.remaining_attempts > 0 && self.remaining_attempts < self.max_attempts
    }

    /// Progress dots are visible while collecting or reviewing an attempt.
    pub fn show_progress(&self) -> bool {
        self.phase == Phase::Collecting || !self.entered.is_empty()
    }
}

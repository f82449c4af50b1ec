//! Session errors.
//!
//! Every variant is recoverable: the session is left in a safe phase and the
//! caller decides how to surface it.

use crate::types::Phase;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Length, attempts, or custom secret out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The speech capability reported a failure.
    #[error("announce failed: {0}")]
    AnnounceFailed(String),
    /// No speech facility in this environment.
    #[error("speech unsupported: {0}")]
    UnsupportedCapability(String),
    /// `announce` while a previous announcement is still playing.
    #[error("an announcement is already in progress")]
    AnnounceInProgress,
    /// Operation not allowed in the current phase.
    #[error("{op} is not allowed while {phase}")]
    InvalidPhase { op: &'static str, phase: Phase },
}

pub type GameResult<T> = Result<T, GameError>;

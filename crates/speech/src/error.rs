use crate::core::GameError;

/// Failures of the speech capability.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    /// No usable speech program in this environment.
    #[error("{0}")]
    Unsupported(String),
    #[error("failed to start speech program: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("{0}")]
    Exited(String),
    #[error("speech timed out after {0}ms")]
    TimedOut(u64),
    #[error("failed to start speech runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl From<SpeechError> for GameError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::Unsupported(reason) => GameError::UnsupportedCapability(reason),
            other => GameError::AnnounceFailed(other.to_string()),
        }
    }
}

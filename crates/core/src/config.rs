//! Game configuration and validation.

use crate::error::{GameError, GameResult};
use crate::secret::{check_length, Secret};
use crate::types::{
    ShuffleFrequency, ATTEMPTS_MAX, ATTEMPTS_MIN, DEFAULT_MAX_ATTEMPTS, DEFAULT_SECRET_LEN,
};

/// Settings a session is configured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Secret length (3-8)
    pub length: u8,
    /// Attempts per round (1-10)
    pub max_attempts: u8,
    pub shuffle: ShuffleFrequency,
    /// Replay the code automatically after a wrong guess
    pub auto_replay: bool,
    /// Digits to use instead of a random secret
    pub custom_secret: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_SECRET_LEN,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            shuffle: ShuffleFrequency::default(),
            auto_replay: false,
            custom_secret: None,
        }
    }
}

impl GameConfig {
    pub fn new(length: u8, max_attempts: u8, shuffle: ShuffleFrequency) -> Self {
        Self {
            length,
            max_attempts,
            shuffle,
            ..Self::default()
        }
    }

    pub fn with_custom_secret(mut self, secret: impl Into<String>) -> Self {
        self.custom_secret = Some(secret.into());
        self
    }

    pub fn with_auto_replay(mut self, on: bool) -> Self {
        self.auto_replay = on;
        self
    }

    /// Check ranges and parse the custom secret.
    ///
    /// An empty custom secret counts as "none".
    pub fn validate(&self) -> GameResult<Option<Secret>> {
        check_length(self.length)?;
        if !(ATTEMPTS_MIN..=ATTEMPTS_MAX).contains(&self.max_attempts) {
            return Err(GameError::InvalidConfiguration(format!(
                "max attempts must be between {} and {}, got {}",
                ATTEMPTS_MIN, ATTEMPTS_MAX, self.max_attempts
            )));
        }

        match self.custom_secret.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => Secret::parse(text, self.length).map(Some),
        }
    }
}

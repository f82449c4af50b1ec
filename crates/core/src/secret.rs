//! Secret module - the code the player has to reproduce

use arrayvec::ArrayVec;

use crate::error::{GameError, GameResult};
use crate::rng::SimpleRng;
use crate::types::{Digit, SpeechLanguage, SECRET_LEN_MAX, SECRET_LEN_MIN};

/// Fixed-capacity digit buffer, large enough for the longest secret.
pub type DigitBuf = ArrayVec<Digit, { SECRET_LEN_MAX as usize }>;

/// Ordered digit sequence of a validated length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secret {
    digits: DigitBuf,
}

impl Secret {
    /// Draw `len` uniformly random digits.
    ///
    /// `len` must already be validated (see [`check_length`]).
    pub fn generate(rng: &mut SimpleRng, len: u8) -> Self {
        debug_assert!((SECRET_LEN_MIN..=SECRET_LEN_MAX).contains(&len));
        let mut digits = DigitBuf::new();
        for _ in 0..len.min(SECRET_LEN_MAX) {
            digits.push(rng.next_digit());
        }
        Self { digits }
    }

    /// Parse a user-supplied secret that must be exactly `len` ASCII digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_dictation_core::Secret;
    ///
    /// let s = Secret::parse("1234", 4).unwrap();
    /// assert_eq!(s.to_string(), "1234");
    /// assert!(Secret::parse("12a4", 4).is_err());
    /// assert!(Secret::parse("123", 4).is_err());
    /// ```
    pub fn parse(text: &str, len: u8) -> GameResult<Self> {
        check_length(len)?;
        let text = text.trim();
        if text.chars().count() != len as usize {
            return Err(GameError::InvalidConfiguration(format!(
                "custom secret must have {} digits, got {}",
                len,
                text.chars().count()
            )));
        }

        let mut digits = DigitBuf::new();
        for c in text.chars() {
            let d = Digit::from_char(c).ok_or_else(|| {
                GameError::InvalidConfiguration(format!("custom secret contains non-digit {:?}", c))
            })?;
            digits.push(d);
        }
        Ok(Self { digits })
    }

    pub fn digits(&self) -> &[Digit] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Element-wise comparison against an attempt.
    pub fn matches(&self, attempt: &[Digit]) -> bool {
        self.digits.as_slice() == attempt
    }

    /// Render as pronounceable words, e.g. `"one, two, three"`.
    pub fn spoken(&self, lang: SpeechLanguage) -> String {
        let mut out = String::new();
        for (i, d) in self.digits.iter().enumerate() {
            if i > 0 {
                out.push_str(lang.separator());
            }
            out.push_str(d.word(lang));
        }
        out
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for d in &self.digits {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

pub(crate) fn check_length(len: u8) -> GameResult<()> {
    if (SECRET_LEN_MIN..=SECRET_LEN_MAX).contains(&len) {
        Ok(())
    } else {
        Err(GameError::InvalidConfiguration(format!(
            "length must be between {} and {}, got {}",
            SECRET_LEN_MIN, SECRET_LEN_MAX, len
        )))
    }
}

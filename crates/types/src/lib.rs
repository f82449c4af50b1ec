//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (session logic, terminal rendering, speech bridge).
//!
//! # Keypad Geometry
//!
//! The keypad is a telephone-style grid:
//!
//! - **Columns**: 3
//! - **Slots**: 12 (four rows)
//! - **Blank slots**: indices 9 and 11 (bottom row, left and right)
//!
//! ```text
//!  1  2  3
//!  4  5  6
//!  7  8  9
//!     0
//! ```
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Main loop timestep |
//! | `INPUT_CLEAR_DELAY_MS` | 1000 | How long an evaluated attempt stays visible |
//! | `AUTO_REPLAY_DELAY_MS` | 1500 | Delay before replaying the code after a wrong guess |
//! | `SUCCESS_OVERLAY_MS` | 2000 | Success overlay duration |
//! | `FAILURE_OVERLAY_MS` | 1000 | Failure overlay duration |
//!
//! # Examples
//!
//! ```
//! use tui_dictation_types::{Digit, ShuffleFrequency, SpeechLanguage};
//!
//! let d = Digit::from_char('7').unwrap();
//! assert_eq!(d.value(), 7);
//! assert_eq!(d.word(SpeechLanguage::English), "seven");
//!
//! assert_eq!(ShuffleFrequency::from_str("never"), Some(ShuffleFrequency::Never));
//! assert_eq!(ShuffleFrequency::EveryGame.next(), ShuffleFrequency::EveryRound);
//! ```

use std::fmt;

/// Shortest secret the game accepts
pub const SECRET_LEN_MIN: u8 = 3;

/// Longest secret the game accepts
pub const SECRET_LEN_MAX: u8 = 8;

/// Secret length when nothing is configured
pub const DEFAULT_SECRET_LEN: u8 = 4;

/// Fewest attempts a round can allow
pub const ATTEMPTS_MIN: u8 = 1;

/// Most attempts a round can allow
pub const ATTEMPTS_MAX: u8 = 10;

/// Attempts per round when nothing is configured
pub const DEFAULT_MAX_ATTEMPTS: u8 = 3;

/// Number of keypad slots (ten digits plus two blanks)
pub const KEYPAD_SLOTS: usize = 12;

/// Keypad grid width
pub const KEYPAD_COLUMNS: usize = 3;

/// Keypad grid height
pub const KEYPAD_ROWS: usize = KEYPAD_SLOTS / KEYPAD_COLUMNS;

/// Slots that never carry a digit
pub const BLANK_SLOTS: [usize; 2] = [9, 11];

/// Main loop timestep (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long an evaluated attempt stays on screen before it is cleared
pub const INPUT_CLEAR_DELAY_MS: u32 = 1000;

/// Delay before the code is replayed after a wrong guess (auto replay on)
pub const AUTO_REPLAY_DELAY_MS: u32 = 1500;

/// Success overlay duration
pub const SUCCESS_OVERLAY_MS: u32 = 2000;

/// Failure overlay duration
pub const FAILURE_OVERLAY_MS: u32 = 1000;

/// Speaking rate relative to the engine default (slower is easier to follow)
pub const DEFAULT_SPEECH_RATE: f32 = 0.8;


/// A single decimal digit (0-9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digit(u8);

impl Digit {
    /// All ten digits in ascending order
    pub const ALL: [Digit; 10] = [
        Digit(0),
        Digit(1),
        Digit(2),
        Digit(3),
        Digit(4),
        Digit(5),
        Digit(6),
        Digit(7),
        Digit(8),
        Digit(9),
    ];

    /// Create a digit, rejecting values above 9
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Digit(value))
    }

    /// Parse an ASCII digit character
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_dictation_types::Digit;
    ///
    /// assert_eq!(Digit::from_char('3').map(|d| d.value()), Some(3));
    /// assert_eq!(Digit::from_char('a'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10).map(|v| Digit(v as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        (b'0' + self.0) as char
    }

    /// Pronounceable word for this digit
    pub fn word(self, lang: SpeechLanguage) -> &'static str {
        const EN: [&str; 10] = [
            "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
        ];
        const ZH: [&str; 10] = ["零", "一", "二", "三", "四", "五", "六", "七", "八", "九"];
        match lang {
            SpeechLanguage::English => EN[self.0 as usize],
            SpeechLanguage::Mandarin => ZH[self.0 as usize],
        }
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One keypad slot
///
/// - `None`: blank slot (never produces input)
/// - `Some(Digit)`: a pressable digit button
pub type KeySlot = Option<Digit>;

/// When the keypad layout is re-randomized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShuffleFrequency {
    /// Reshuffle when a new game starts
    EveryGame,
    /// Reshuffle on every new round
    #[default]
    EveryRound,
    /// Always use the canonical ascending layout
    Never,
}

impl ShuffleFrequency {
    /// Parse from string (case-insensitive, dashes/spaces/underscores optional)
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "everygame" | "game" => Some(ShuffleFrequency::EveryGame),
            "everyround" | "round" => Some(ShuffleFrequency::EveryRound),
            "never" => Some(ShuffleFrequency::Never),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShuffleFrequency::EveryGame => "every-game",
            ShuffleFrequency::EveryRound => "every-round",
            ShuffleFrequency::Never => "never",
        }
    }

    /// Whether this policy produces shuffled layouts at all
    pub fn reshuffles(&self) -> bool {
        !matches!(self, ShuffleFrequency::Never)
    }

    /// Next policy in settings order (wraps around)
    pub fn next(&self) -> Self {
        match self {
            ShuffleFrequency::EveryGame => ShuffleFrequency::EveryRound,
            ShuffleFrequency::EveryRound => ShuffleFrequency::Never,
            ShuffleFrequency::Never => ShuffleFrequency::EveryGame,
        }
    }
}

/// Session phases
///
/// The cycle is `Idle → Announcing → Collecting → (evaluate) → Idle`.
/// A wrong guess with attempts left stays in `Collecting`; running out of
/// attempts parks the session in `Exhausted` until a new round starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Announcing,
    Collecting,
    Exhausted,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Announcing => "announcing",
            Phase::Collecting => "collecting",
            Phase::Exhausted => "exhausted",
        }
    }

    /// Keypad accepts digits only while collecting
    pub fn accepts_input(&self) -> bool {
        matches!(self, Phase::Collecting)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of the notice shown to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageKind {
    #[default]
    Info,
    Success,
    Error,
}

/// Outcome flash shown after an evaluated attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Success,
    Failure,
}

/// Session-side events, drained by the front end after each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The code finished playing; the keypad is live
    Announced,
    /// Speech failed; the session is back to idle
    AnnounceFailed { reason: String },
    /// The attempt matched the secret
    Success,
    /// Wrong attempt with attempts left
    Retry { remaining: u8 },
    /// Wrong attempt and no attempts left
    Exhausted,
}

/// Language used to pronounce the secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpeechLanguage {
    #[default]
    English,
    Mandarin,
}

impl SpeechLanguage {
    /// Parse from string: "en" | "english", "zh" | "mandarin" | "chinese"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Some(SpeechLanguage::English),
            "zh" | "mandarin" | "chinese" => Some(SpeechLanguage::Mandarin),
            _ => None,
        }
    }

    /// Language tag understood by the speech engines
    pub fn tag(&self) -> &'static str {
        match self {
            SpeechLanguage::English => "en",
            SpeechLanguage::Mandarin => "zh",
        }
    }

    /// Separator placed between spoken digits so the engine pauses
    pub fn separator(&self) -> &'static str {
        match self {
            SpeechLanguage::English => ", ",
            SpeechLanguage::Mandarin => "，",
        }
    }
}

/// Cursor movement on the keypad grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Player actions produced by the input layer
///
/// Settings actions map onto `GameSession` reconfiguration; keypad actions
/// map onto slot presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Press the keypad slot at this index (0-11)
    PressSlot(usize),
    /// Move the keypad cursor
    MoveCursor(Direction),
    /// Press the slot under the cursor
    PressCursor,
    /// Play the code
    Listen,
    /// Start a new round
    NewRound,
    /// Replace the secret with a fresh random one
    RandomSecret,
    /// Start typing a custom code
    EditCustom,
    LengthUp,
    LengthDown,
    AttemptsUp,
    AttemptsDown,
    CycleShuffle,
    ToggleAutoReplay,
}

impl GameAction {
    /// Convert to camelCase string (used in logs)
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::PressSlot(_) => "pressSlot",
            GameAction::MoveCursor(_) => "moveCursor",
            GameAction::PressCursor => "pressCursor",
            GameAction::Listen => "listen",
            GameAction::NewRound => "newRound",
            GameAction::RandomSecret => "randomSecret",
            GameAction::EditCustom => "editCustom",
            GameAction::LengthUp => "lengthUp",
            GameAction::LengthDown => "lengthDown",
            GameAction::AttemptsUp => "attemptsUp",
            GameAction::AttemptsDown => "attemptsDown",
            GameAction::CycleShuffle => "cycleShuffle",
            GameAction::ToggleAutoReplay => "toggleAutoReplay",
        }
    }
}

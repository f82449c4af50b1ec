//! Keypad module - telephone-style digit layout
//!
//! The keypad is a 3x4 grid with two fixed blanks:
//!
//! ```text
//! slot:  0  1  2        canonical:  1  2  3
//!        3  4  5                    4  5  6
//!        6  7  8                    7  8  9
//!        9 10 11                    _  0  _
//! ```
//!
//! Shuffling permutes the ten digits (Fisher-Yates) and writes them back into
//! the ten digit slots in order, so the blanks never move.

use crate::rng::SimpleRng;
use crate::types::{Digit, KeySlot, BLANK_SLOTS, KEYPAD_COLUMNS, KEYPAD_SLOTS};

/// Ordered 12-slot keypad arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeypadLayout {
    slots: [KeySlot; KEYPAD_SLOTS],
}

impl KeypadLayout {
    /// Canonical ascending layout: `1..9`, blank, `0`, blank.
    pub fn canonical() -> Self {
        let digits = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0].map(|v| Digit::ALL[v]);
        Self::from_digit_order(digits)
    }

    /// Uniformly random arrangement of the ten digits on the fixed template.
    pub fn shuffled(rng: &mut SimpleRng) -> Self {
        let mut digits = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0].map(|v| Digit::ALL[v]);
        rng.shuffle(&mut digits);
        Self::from_digit_order(digits)
    }

    /// Place ten digits into the non-blank slots, in slot order.
    fn from_digit_order(digits: [Digit; 10]) -> Self {
        let mut slots = [None; KEYPAD_SLOTS];
        let mut it = digits.into_iter();
        for (i, slot) in slots.iter_mut().enumerate() {
            if !BLANK_SLOTS.contains(&i) {
                *slot = it.next();
            }
        }
        Self { slots }
    }

    pub fn slots(&self) -> &[KeySlot; KEYPAD_SLOTS] {
        &self.slots
    }

    /// Slot contents, `None` for blanks and out-of-range indices.
    pub fn get(&self, index: usize) -> KeySlot {
        self.slots.get(index).copied().flatten()
    }

    /// Slot index currently holding `digit`.
    pub fn position_of(&self, digit: Digit) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(digit))
    }

    /// Iterate rows of `KEYPAD_COLUMNS` slots.
    pub fn rows(&self) -> impl Iterator<Item = &[KeySlot]> {
        self.slots.chunks(KEYPAD_COLUMNS)
    }

    pub fn is_canonical(&self) -> bool {
        *self == Self::canonical()
    }
}

impl Default for KeypadLayout {
    fn default() -> Self {
        Self::canonical()
    }
}

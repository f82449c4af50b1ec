//! Custom code entry: a small line editor for digits.
//!
//! While an entry is open every key goes to it instead of the keypad map.
//! Digit keys here mean digits, not keypad positions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::SECRET_LEN_MAX;

/// What a key did to the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Still typing.
    Editing,
    /// Enter pressed; apply this text.
    Submit(String),
    /// Esc pressed; drop the entry.
    Cancel,
}

/// Digits typed so far, at most `SECRET_LEN_MAX`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeEntry {
    text: String,
}

impl CodeEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EntryOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return EntryOutcome::Editing;
        }
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.text.len() < SECRET_LEN_MAX as usize {
                    self.text.push(c);
                }
                EntryOutcome::Editing
            }
            KeyCode::Backspace => {
                self.text.pop();
                EntryOutcome::Editing
            }
            KeyCode::Enter => EntryOutcome::Submit(std::mem::take(&mut self.text)),
            KeyCode::Esc => EntryOutcome::Cancel,
            _ => EntryOutcome::Editing,
        }
    }
}

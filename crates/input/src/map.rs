//! Key mapping from terminal events to game actions.

use crate::types::{Direction, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keypad slot selected by a digit key, telephone style.
///
/// Keys name positions, not digits: `1`-`9` are the top three rows and `0`
/// is the bottom middle. What digit sits there depends on the layout.
pub fn slot_for_key(c: char) -> Option<usize> {
    match c {
        '1'..='9' => Some(c as usize - '1' as usize),
        '0' => Some(10),
        _ => None,
    }
}

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Keypad positions
        KeyCode::Char(c) if slot_for_key(c).is_some() => slot_for_key(c).map(GameAction::PressSlot),

        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(GameAction::MoveCursor(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(GameAction::MoveCursor(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(GameAction::MoveCursor(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(GameAction::MoveCursor(Direction::Down))
        }
        KeyCode::Enter => Some(GameAction::PressCursor),

        // Round control
        KeyCode::Char(' ') => Some(GameAction::Listen),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameAction::NewRound),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::RandomSecret),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::EditCustom),

        // Settings
        KeyCode::Char(']') => Some(GameAction::LengthUp),
        KeyCode::Char('[') => Some(GameAction::LengthDown),
        KeyCode::Char('=') | KeyCode::Char('+') => Some(GameAction::AttemptsUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(GameAction::AttemptsDown),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(GameAction::CycleShuffle),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::ToggleAutoReplay),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

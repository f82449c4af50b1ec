//! Key mapping and cursor behaviour against a live session

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tui_dictation::core::{GameConfig, GameSession};
use tui_dictation::input::{handle_key_event, should_quit, CodeEntry, EntryOutcome, KeypadCursor};
use tui_dictation::types::{Direction, GameAction, GameEvent, ShuffleFrequency};

fn key(c: char) -> KeyEvent {
    KeyEvent::from(KeyCode::Char(c))
}

#[test]
fn test_digit_keys_enter_code_on_canonical_keypad() {
    let config = GameConfig::new(4, 3, ShuffleFrequency::Never).with_custom_secret("1590");
    let mut session = GameSession::with_config(config, 8).unwrap();
    let a = session.announce().unwrap();
    session.finish_announcement(a.ticket, Ok(()));

    for c in "1590".chars() {
        match handle_key_event(key(c)) {
            Some(GameAction::PressSlot(slot)) => assert!(session.press_slot(slot)),
            other => panic!("unexpected {:?}", other),
        }
    }
    assert!(session.take_events().contains(&GameEvent::Success));
}

#[test]
fn test_cursor_walks_to_zero_and_presses_it() {
    let config = GameConfig::new(3, 3, ShuffleFrequency::Never).with_custom_secret("000");
    let mut session = GameSession::with_config(config, 8).unwrap();
    let a = session.announce().unwrap();
    session.finish_announcement(a.ticket, Ok(()));

    let mut cursor = KeypadCursor::default();
    for _ in 0..5 {
        cursor.step(Direction::Down);
    }
    assert_eq!(cursor.index(), 10);
    for _ in 0..3 {
        assert!(session.press_slot(cursor.index()));
    }
    assert!(session.take_events().contains(&GameEvent::Success));
}

#[test]
fn test_control_keys() {
    assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
    assert_eq!(
        handle_key_event(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::CONTROL)),
        None
    );
    assert_eq!(handle_key_event(key(' ')), Some(GameAction::Listen));
    assert_eq!(handle_key_event(key('n')), Some(GameAction::NewRound));
}

#[test]
fn test_custom_code_entry_sets_next_secret() {
    let mut session =
        GameSession::with_config(GameConfig::new(4, 3, ShuffleFrequency::Never), 8).unwrap();
    assert_eq!(handle_key_event(key('c')), Some(GameAction::EditCustom));
    assert!(session.accepts_secret_change());

    let mut entry = CodeEntry::new();
    for c in "4321".chars() {
        assert_eq!(entry.handle_key(key(c)), EntryOutcome::Editing);
    }
    let EntryOutcome::Submit(text) = entry.handle_key(KeyEvent::from(KeyCode::Enter)) else {
        panic!("enter should submit");
    };
    session.apply_custom_secret(&text).unwrap();
    assert!(session.custom_pinned());
    assert_eq!(session.secret().to_string(), "4321");

    let a = session.announce().unwrap();
    assert_eq!(a.text, "four, three, two, one");
    assert!(!session.accepts_secret_change());
}

//! Keypad cursor for arrow-key navigation.

use crate::types::{Direction, BLANK_SLOTS, KEYPAD_COLUMNS, KEYPAD_ROWS};

/// Highlighted keypad slot. Never rests on a blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadCursor {
    index: usize,
}

impl Default for KeypadCursor {
    fn default() -> Self {
        // Centre key.
        Self { index: 4 }
    }
}

impl KeypadCursor {
    pub fn new(index: usize) -> Self {
        let mut cursor = Self::default();
        if index < KEYPAD_COLUMNS * KEYPAD_ROWS && !BLANK_SLOTS.contains(&index) {
            cursor.index = index;
        }
        cursor
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Step in `dir`, skipping blanks. Stays put at the grid edge.
    pub fn step(&mut self, dir: Direction) {
        let (dx, dy): (isize, isize) = match dir {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        };

        let mut x = (self.index % KEYPAD_COLUMNS) as isize;
        let mut y = (self.index / KEYPAD_COLUMNS) as isize;
        loop {
            x += dx;
            y += dy;
            if x < 0 || y < 0 || x >= KEYPAD_COLUMNS as isize || y >= KEYPAD_ROWS as isize {
                return;
            }
            let idx = y as usize * KEYPAD_COLUMNS + x as usize;
            if !BLANK_SLOTS.contains(&idx) {
                self.index = idx;
                return;
            }
        }
    }
}

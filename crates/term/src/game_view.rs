//! GameView: maps a `SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::SessionSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{MessageKind, Overlay, Phase, KEYPAD_COLUMNS};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Presentation state that lives outside the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiState<'a> {
    /// Highlighted keypad slot.
    pub cursor: Option<usize>,
    /// Speech engine label for the settings line.
    pub speech: &'a str,
    /// Custom code being typed, if the editor is open.
    pub entry: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PANEL_W: u16 = 48;
const PANEL_H: u16 = 20;

const KEY_W: u16 = 5;
const KEY_GAP: u16 = 2;

// Row offsets inside the panel.
const ROW_TITLE: u16 = 0;
const ROW_NOTICE: u16 = 2;
const ROW_PROGRESS: u16 = 4;
const ROW_ATTEMPTS: u16 = 5;
const ROW_KEYPAD: u16 = 7;
const ROW_ENTRY: u16 = 15;
const ROW_SETTINGS: u16 = 16;
const ROW_HELP: u16 = 18;

const BG: Rgb = Rgb::new(0, 0, 0);

/// Renders the dictation game as a fixed-size centred panel.
pub struct GameView {
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        ui: &UiState<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let x0 = viewport.width.saturating_sub(PANEL_W) / 2;
        let y0 = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(PANEL_H) / 2,
            AnchorY::Top => 0,
        };

        let title = CellStyle::new(Rgb::new(120, 200, 255), BG).bold();
        fb.put_str_centered(x0, y0 + ROW_TITLE, PANEL_W, "DIGIT DICTATION", title);

        self.draw_notice(fb, snap, x0, y0 + ROW_NOTICE);
        self.draw_progress(fb, snap, x0, y0);
        self.draw_keypad(fb, snap, ui, x0, y0 + ROW_KEYPAD);
        if let Some(overlay) = snap.overlay {
            self.draw_overlay(fb, overlay, x0, y0 + ROW_KEYPAD);
        }
        if let Some(text) = ui.entry {
            self.draw_entry(fb, snap, text, x0, y0 + ROW_ENTRY);
        }
        self.draw_settings(fb, snap, ui, x0, y0 + ROW_SETTINGS);
        self.draw_help(fb, x0, y0 + ROW_HELP);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, ui: &UiState<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, ui, viewport, &mut fb);
        fb
    }

    fn draw_notice(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, x: u16, y: u16) {
        let bg = match snap.message_kind {
            MessageKind::Info => Rgb::new(30, 40, 70),
            MessageKind::Success => Rgb::new(20, 90, 40),
            MessageKind::Error => Rgb::new(110, 30, 30),
        };
        let style = CellStyle::new(Rgb::new(240, 240, 240), bg).bold();
        fb.fill_rect(x, y, PANEL_W, 1, ' ', style);
        fb.put_str_centered(x, y, PANEL_W, &snap.message, style);
    }

    fn draw_progress(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, x0: u16, y0: u16) {
        if snap.show_progress() {
            let filled = CellStyle::new(Rgb::new(250, 210, 90), BG).bold();
            let empty = CellStyle::new(Rgb::new(90, 90, 100), BG);
            // "● ● ○ ○": one glyph plus a space per digit.
            let w = (snap.length as u16 * 2).saturating_sub(1);
            let mut x = x0 + PANEL_W.saturating_sub(w) / 2;
            for i in 0..snap.length as usize {
                if i < snap.entered.len() {
                    fb.put_char(x, y0 + ROW_PROGRESS, '●', filled);
                } else {
                    fb.put_char(x, y0 + ROW_PROGRESS, '○', empty);
                }
                x = x.saturating_add(2);
            }
        }

        if snap.show_attempts() {
            let style = CellStyle::new(Rgb::new(230, 150, 80), BG);
            // "attempts 2/3"
            let w = 9 + 1 + 1 + 2;
            let x = x0 + PANEL_W.saturating_sub(w) / 2;
            let y = y0 + ROW_ATTEMPTS;
            let x = fb.put_str(x, y, "attempts ", style);
            let x = fb.put_u32(x, y, snap.remaining_attempts as u32, style);
            let x = fb.put_str(x, y, "/", style);
            fb.put_u32(x, y, snap.max_attempts as u32, style);
        }
    }

    fn draw_keypad(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        ui: &UiState<'_>,
        x0: u16,
        y0: u16,
    ) {
        let active = snap.keypad_active();
        let key = if active {
            CellStyle::new(Rgb::new(235, 235, 235), Rgb::new(40, 40, 55)).bold()
        } else {
            CellStyle::new(Rgb::new(110, 110, 120), Rgb::new(25, 25, 30)).dim()
        };
        let cursor = if active {
            CellStyle::new(Rgb::new(0, 0, 0), Rgb::new(250, 210, 90)).bold()
        } else {
            CellStyle::new(Rgb::new(30, 30, 30), Rgb::new(120, 105, 60))
        };

        let grid_w = KEY_W * KEYPAD_COLUMNS as u16 + KEY_GAP * (KEYPAD_COLUMNS as u16 - 1);
        let left = x0 + PANEL_W.saturating_sub(grid_w) / 2;

        for (row, slots) in snap.layout.rows().enumerate() {
            let y = y0 + row as u16 * 2;
            for (col, slot) in slots.iter().enumerate() {
                let Some(digit) = slot else {
                    continue;
                };
                let index = row * KEYPAD_COLUMNS + col;
                let style = if ui.cursor == Some(index) { cursor } else { key };
                let x = left + col as u16 * (KEY_W + KEY_GAP);
                fb.fill_rect(x, y, KEY_W, 1, ' ', style);
                fb.put_char(x + KEY_W / 2, y, digit.as_char(), style);
            }
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, overlay: Overlay, x0: u16, keypad_y: u16) {
        let (text, bg) = match overlay {
            Overlay::Success => ("  ✓ CORRECT  ", Rgb::new(30, 140, 60)),
            Overlay::Failure => ("  ✗ WRONG  ", Rgb::new(170, 40, 40)),
        };
        let style = CellStyle::new(Rgb::new(255, 255, 255), bg).bold();
        // Gap row between the second and third keypad rows.
        fb.put_str_centered(x0, keypad_y + 3, PANEL_W, text, style);
    }

    fn draw_entry(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, text: &str, x0: u16, y: u16) {
        let label = CellStyle::new(Rgb::new(130, 130, 140), BG);
        let value = CellStyle::new(Rgb::new(250, 210, 90), BG).bold();

        let mut x = fb.put_str(x0, y, "custom code: ", label);
        x = fb.put_str(x, y, text, value);
        // Placeholders up to the current code length.
        for _ in text.chars().count()..snap.length as usize {
            x = fb.put_str(x, y, "_", label);
        }
        fb.put_str(x, y, "  enter apply  esc cancel", label);
    }

    fn draw_settings(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        ui: &UiState<'_>,
        x0: u16,
        y: u16,
    ) {
        let label = CellStyle::new(Rgb::new(130, 130, 140), BG);
        let value = CellStyle::new(Rgb::new(220, 220, 220), BG);

        let mut x = fb.put_str(x0, y, "len ", label);
        x = fb.put_u32(x, y, snap.length as u32, value);
        if snap.custom_pinned {
            x = fb.put_str(x, y, "*", value);
        }
        x = fb.put_str(x, y, "  tries ", label);
        x = fb.put_u32(x, y, snap.max_attempts as u32, value);
        x = fb.put_str(x, y, "  shuffle ", label);
        x = fb.put_str(x, y, snap.shuffle.as_str(), value);
        x = fb.put_str(x, y, "  replay ", label);
        x = fb.put_str(x, y, if snap.auto_replay { "on" } else { "off" }, value);
        if snap.replay_pending {
            x = fb.put_str(x, y, "…", value);
        }

        let y = y + 1;
        x = fb.put_str(x0, y, "speech ", label);
        x = fb.put_str(x, y, ui.speech, value);
        x = fb.put_str(x, y, " (", label);
        x = fb.put_str(x, y, snap.language.tag(), value);
        x = fb.put_str(x, y, ")  won ", label);
        x = fb.put_u32(x, y, snap.rounds_won, value);
        if snap.phase != Phase::Idle {
            x = fb.put_str(x, y, "  ", label);
            fb.put_str(x, y, snap.phase.as_str(), label);
        }
    }

    fn draw_help(&self, fb: &mut FrameBuffer, x0: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(100, 100, 110), BG);
        fb.put_str(x0, y, "space listen  1-9 0 keys  arrows/enter  n new", style);
        fb.put_str(x0, y + 1, "r rand c code [ ] len -+ tries f shuf a replay q", style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_fits_in_small_viewport() {
        let snap = SessionSnapshot::default();
        let fb = GameView::default().render(&snap, &UiState::default(), Viewport::new(10, 4));
        assert_eq!(fb.width(), 10);
        assert_eq!(fb.height(), 4);
    }

    #[test]
    fn top_anchor_puts_title_on_first_row() {
        let snap = SessionSnapshot::default();
        let fb = GameView::new()
            .with_anchor_y(AnchorY::Top)
            .render(&snap, &UiState::default(), Viewport::new(60, 24));
        assert!(fb.row_text(0).contains("DIGIT DICTATION"));
    }
}

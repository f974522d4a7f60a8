//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested. The board is drawn two terminal
//! columns per cell to make blocks look square.

use crate::core::{template, GameSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Phase, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

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

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_W: u16 = 12;

/// Where the board frame sits in the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Terminal renderer for the playfield and side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Columns and rows needed for the board frame plus the side panel.
    pub fn min_viewport(&self) -> Viewport {
        Viewport::new(
            BOARD_WIDTH as u16 * self.cell_w + 2 + 2 + PANEL_MIN_W,
            BOARD_HEIGHT as u16 + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let h = BOARD_HEIGHT as u16 + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w + 2 + PANEL_MIN_W) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        self.draw_border(fb, frame);
        self.draw_board(fb, frame, snap);
        self.draw_side_panel(fb, frame, snap, viewport);

        let overlay = match snap.phase {
            Phase::Idle => Some("PRESS ENTER"),
            Phase::GameOver => Some("GAME OVER"),
            _ if snap.paused => Some("PAUSED"),
            _ => None,
        };
        if let Some(text) = overlay {
            self.draw_overlay_text(fb, frame, text);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, f: Frame) {
        let style = CellStyle::fg(Rgb::new(200, 200, 200));
        let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

        fb.put_char(f.x, f.y, '┌', style);
        fb.put_char(right, f.y, '┐', style);
        fb.put_char(f.x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for x in f.x + 1..right {
            fb.put_char(x, f.y, '─', style);
            fb.put_char(x, bottom, '─', style);
        }
        for y in f.y + 1..bottom {
            fb.put_char(f.x, y, '│', style);
            fb.put_char(right, y, '│', style);
        }
    }

    fn draw_board(&self, fb: &mut FrameBuffer, f: Frame, snap: &GameSnapshot) {
        let empty = CellStyle::fg(Rgb::new(90, 90, 100)).on(WELL_BG).dim();

        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                let px = f.x + 1 + x as u16 * self.cell_w;
                let py = f.y + 1 + y as u16;
                match snap.cell(x, y) {
                    Some(kind) => {
                        let active = snap
                            .active
                            .is_some_and(|a| a.cells.iter().any(|p| p.x == x && p.y == y));
                        fb.fill_rect(px, py, self.cell_w, 1, '█', block_style(kind, active));
                    }
                    None => {
                        fb.fill_rect(px, py, self.cell_w, 1, ' ', empty);
                        fb.put_char(px, py, '·', empty);
                    }
                }
            }
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, f: Frame, snap: &GameSnapshot, vp: Viewport) {
        let x = f.x + f.w + 2;
        if x.saturating_add(PANEL_MIN_W) > vp.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let mut y = f.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("ROWS", snap.rows_cleared),
            ("LEVEL", snap.level),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(x, y, "NEXT", label);
        self.draw_preview(fb, x, y + 1, snap.next);
        y += 4;

        fb.put_str(x, y, "SPEED", label);
        let end = fb.put_u32(x, y + 1, snap.tick_interval_ms, value);
        fb.put_str(end, y + 1, "ms", value.dim());
    }

    /// Draw a shape's spawn layout with its top-left at (x, y).
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: ShapeKind) {
        let offsets = template(kind).offsets;
        let min_x = offsets.iter().map(|o| o.0).min().unwrap_or(0);
        let min_y = offsets.iter().map(|o| o.1).min().unwrap_or(0);
        let style = block_style(kind, false);
        for (dx, dy) in offsets {
            let px = x + (dx - min_x) as u16 * self.cell_w;
            let py = y + (dy - min_y) as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, f: Frame, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = f.x + f.w.saturating_sub(text_w) / 2;
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        fb.put_str(x, f.y + f.h / 2, text, style);
    }
}

fn block_style(kind: ShapeKind, active: bool) -> CellStyle {
    let fg = Rgb::from(kind.color());
    let style = CellStyle::fg(fg).on(WELL_BG);
    if active {
        style.bold()
    } else {
        CellStyle::fg(fg.scaled(4, 5)).on(WELL_BG)
    }
}

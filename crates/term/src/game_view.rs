//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{mask_for, ActivePiece, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, MASK_SIZE};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PANEL_GAP: u16 = 2;
const PANEL_W: u16 = 16;

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

const CONTROLS: [&str; 7] = [
    "←/→    move",
    "↓      soft drop",
    "↑/X    rotate",
    "Space  drop",
    "C      hold",
    "P      resume",
    "Q      quit",
];

/// Renders the board, the side panel and the pause/end overlays.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Board placement inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is only resized
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.frame(viewport);
        let board_w = frame.w - 2;
        let board_h = frame.h - 2;

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            board_w,
            board_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAYFIELD_BG),
        );
        fb.draw_box(
            frame.x,
            frame.y,
            frame.w,
            frame.h,
            CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG),
        );

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => self.draw_food_cell(fb, frame, x as u16, y as u16, *kind),
                    None => self.draw_empty_cell(fb, frame, x as u16, y as u16),
                }
            }
        }

        if let Some(ghost) = snap.ghost {
            let style = CellStyle::new(ghost.kind.color_rgb().darken(3, 5), PLAYFIELD_BG).dim();
            for (x, y) in visible_cells(&ghost) {
                self.fill_cell(fb, frame, x, y, '░', style);
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in visible_cells(&active) {
                self.draw_food_cell(fb, frame, x, y, active.kind);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.paused {
            self.draw_overlay(fb, frame, "PAUSED", &CONTROLS);
        } else if snap.won {
            self.draw_overlay(fb, frame, "YOU WIN", &["Press R to Restart"]);
        } else if snap.game_over {
            self.draw_overlay(fb, frame, "GAME OVER", &["Press R to Restart"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Top-left terminal position of board cell `(x, y)`.
    pub fn cell_origin(&self, viewport: Viewport, x: u16, y: u16) -> (u16, u16) {
        let frame = self.frame(viewport);
        (
            frame.x + 1 + x * self.cell_w,
            frame.y + 1 + y * self.cell_h,
        )
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let total_w = w + PANEL_GAP + PANEL_W;

        let x = viewport.width.saturating_sub(total_w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        self.fill_cell(fb, frame, x, y, '·', style);
    }

    /// Food colour with the label's initial in the first column.
    fn draw_food_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: PieceKind) {
        let bg = kind.color_rgb();
        let style = CellStyle::new(bg.contrast_text(), bg).bold();
        self.fill_cell(fb, frame, x, y, ' ', style);

        let (px, py) = (frame.x + 1 + x * self.cell_w, frame.y + 1 + y * self.cell_h);
        fb.put_char(px, py, kind.initial(), style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(PANEL_GAP);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let dim = value.dim();

        let mut y = frame.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        if let Some(target) = snap.fullness_target {
            fb.put_str(panel_x, y, "FULL", label);
            let w = fb.put_u32(panel_x, y + 1, snap.fullness, value);
            fb.put_char(panel_x + w, y + 1, '/', dim);
            fb.put_u32(panel_x + w + 1, y + 1, target, dim);
            y = y.saturating_add(3);
        }

        if let Some(limit) = snap.survival_limit_ms {
            fb.put_str(panel_x, y, "TIME", label);
            let left_s = limit.saturating_sub(snap.timers.play_ms).div_ceil(1000);
            let w = fb.put_u32(panel_x, y + 1, left_s, value);
            fb.put_char(panel_x + w, y + 1, 's', dim);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        match snap.held {
            Some(kind) => {
                let style = if snap.can_hold { value } else { dim };
                fb.put_str(panel_x, y, kind.label(), style);
                y = y.saturating_add(1);
                y = y.saturating_add(draw_mini(fb, panel_x, y, kind));
            }
            None => {
                fb.put_str(panel_x, y, "-", dim);
                y = y.saturating_add(1);
            }
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let Some((&first, rest)) = snap.preview.split_first() else {
            return;
        };
        fb.put_str(panel_x, y, first.label(), value);
        y = y.saturating_add(1);
        y = y.saturating_add(draw_mini(fb, panel_x, y, first));
        for kind in rest {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, kind.label(), dim);
            y = y.saturating_add(1);
        }
    }

    /// Boxed title plus lines, centred on the board.
    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, title: &str, lines: &[&str]) {
        let text_w = lines
            .iter()
            .chain(std::iter::once(&title))
            .map(|s| s.chars().count() as u16)
            .max()
            .unwrap_or(0);
        let w = (text_w + 4).min(frame.w);
        let h = lines.len() as u16 + 4;
        let x = frame.x + frame.w.saturating_sub(w) / 2;
        let y = frame.y + frame.h.saturating_sub(h) / 2;

        let body = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG);
        fb.fill_rect(x, y, w, h, ' ', body);
        fb.draw_box(x, y, w, h, body);

        let title_w = title.chars().count() as u16;
        fb.put_str(
            x + w.saturating_sub(title_w) / 2,
            y + 1,
            title,
            CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold(),
        );
        for (i, line) in lines.iter().enumerate() {
            fb.put_str(x + 2, y + 3 + i as u16, line, body);
        }
    }
}

/// On-board cells of a piece, skipping anything above the top row.
fn visible_cells(piece: &ActivePiece) -> impl Iterator<Item = (u16, u16)> {
    piece.cells().filter_map(|(x, y)| {
        let inside = (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y);
        inside.then_some((x as u16, y as u16))
    })
}

/// Small picture of a kind's spawn mask, 2 columns per cell. Returns rows used.
fn draw_mini(fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) -> u16 {
    let mask = mask_for(kind, Rotation::North);
    let style = CellStyle::new(kind.color_rgb(), kind.color_rgb());
    let mut used = 0;
    for row in mask.rows().iter().filter(|row| row.iter().any(|&set| set)) {
        for col in 0..MASK_SIZE {
            if row[col] {
                let px = x + col as u16 * 2;
                fb.put_str(px, y + used, "  ", style);
            }
        }
        used += 1;
    }
    used
}

trait FoodStyle {
    fn color_rgb(self) -> Rgb;
    fn initial(self) -> char;
}

impl FoodStyle for PieceKind {
    fn color_rgb(self) -> Rgb {
        Rgb::from_tuple(self.color())
    }

    fn initial(self) -> char {
        self.label().chars().next().unwrap_or('#')
    }
}

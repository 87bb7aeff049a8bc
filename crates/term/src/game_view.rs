//! GameView: maps a `GameSnapshot` plus the leaderboard into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use chrono::Local;

use crate::core::{ActiveSnapshot, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::scores::LeaderboardEntry;
use crate::types::{Cell, PieceKind};

/// How many leaderboard entries the side panel lists
pub const LEADERBOARD_ROWS: usize = 5;

const FIELD_BG: Rgb = Rgb::new(243, 244, 246);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Block color of a piece kind
pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::hex(0xFF8000),
        PieceKind::J => Rgb::hex(0xFF0000),
        PieceKind::L => Rgb::hex(0x00BFFF),
        PieceKind::O => Rgb::hex(0x0000FF),
        PieceKind::S => Rgb::hex(0xFFBF00),
        PieceKind::T => Rgb::hex(0x800080),
        PieceKind::Z => Rgb::hex(0x00FF00),
    }
}

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

/// Playfield, stats panel and game-over overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Where the playfield landed inside the viewport
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        leaderboard: &[LeaderboardEntry],
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let grid_w = (snap.width as u16).saturating_mul(self.cell_w);
        let grid_h = (snap.height as u16).saturating_mul(self.cell_h);
        let frame = Frame {
            x: viewport.width.saturating_sub(grid_w + 2) / 3,
            y: viewport.height.saturating_sub(grid_h + 2) / 2,
            w: grid_w + 2,
            h: grid_h + 2,
        };

        self.draw_border(fb, frame);

        for (y, row) in snap.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                self.draw_cell(fb, frame, x as i32, y as i32, cell);
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_y) = snap.ghost_y {
                self.draw_ghost(fb, frame, snap, &active, ghost_y);
            }
            for (x, y, cell) in active.cells() {
                self.draw_cell(fb, frame, x, y, cell);
            }
        }

        self.draw_side_panel(fb, frame, snap, leaderboard);

        if snap.game_over {
            self.draw_game_over(fb, frame, snap.score);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        leaderboard: &[LeaderboardEntry],
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, leaderboard, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame) {
        let Frame { x, y, w, h } = frame;
        let style = CellStyle::fg(Rgb::new(200, 200, 200));

        fb.fill_rect(x + 1, y + 1, w - 2, h - 2, ' ', CellStyle::default().on(FIELD_BG));

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Paint one grid cell; cells above the field or past its edges are skipped.
    fn draw_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i32, y: i32, cell: Cell) {
        let Some(kind) = PieceKind::from_color(cell) else {
            return;
        };
        let style = CellStyle::fg(kind_color(kind)).on(FIELD_BG);
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    fn draw_ghost(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &GameSnapshot,
        active: &ActiveSnapshot,
        ghost_y: i32,
    ) {
        let style = CellStyle::fg(Rgb::new(150, 150, 160)).on(FIELD_BG).dim();
        let dy = ghost_y - active.y;
        for (x, y, _) in active.cells() {
            let occupied = x >= 0
                && y + dy >= 0
                && snap.cell(x as usize, (y + dy) as usize).is_some_and(|c| c != 0);
            if !occupied {
                self.fill_cell(fb, frame, x, y + dy, '░', style);
            }
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: i32,
        y: i32,
        ch: char,
        style: CellStyle,
    ) {
        let cols = (frame.w - 2) / self.cell_w;
        let rows = (frame.h - 2) / self.cell_h;
        if x < 0 || y < 0 || x >= cols as i32 || y >= rows as i32 {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &GameSnapshot,
        leaderboard: &[LeaderboardEntry],
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(3);
        if panel_x.saturating_add(12) > fb.width() {
            return;
        }

        let label = CellStyle::fg(Rgb::new(220, 220, 220)).on(PANEL_BG).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200)).on(PANEL_BG);
        let hint = value.dim();

        let mut y = frame.y;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "TOP SCORES", label);
        y = y.saturating_add(1);
        if leaderboard.is_empty() {
            fb.put_str(panel_x, y, "No scores yet", hint);
            y = y.saturating_add(1);
        }
        for (i, entry) in leaderboard.iter().take(LEADERBOARD_ROWS).enumerate() {
            let date = entry.date.with_timezone(&Local).format("%Y-%m-%d");
            let line = format!("{}. {} pts - {}", i + 1, entry.score, date);
            fb.put_str(panel_x, y, &line, value);
            y = y.saturating_add(1);
        }

        y = y.saturating_add(1);
        for line in [
            "←/→  move",
            "↑    rotate",
            "↓    soft drop",
            "spc  hard drop",
            "r    restart",
            "q    quit",
        ] {
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, frame: Frame, score: u32) {
        let style = CellStyle::fg(Rgb::new(255, 255, 255)).on(Rgb::new(160, 0, 0)).bold();
        let mid_y = frame.y.saturating_add(frame.h / 2);

        let score_line = format!("SCORE {score}");
        for (dy, text) in [(0u16, "GAME OVER"), (1, score_line.as_str()), (2, "R: play again")] {
            let w = text.chars().count() as u16 + 2;
            let x = frame.x.saturating_add(frame.w.saturating_sub(w) / 2);
            fb.fill_rect(x, mid_y + dy, w, 1, ' ', style);
            fb.put_str(x + 1, mid_y + dy, text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameState, Grid, SequenceSource};
    use crate::types::{GameAction, PieceKind, COLS, ROWS};
    use chrono::{TimeZone, Utc};

    fn snapshot_of(state: &GameState) -> GameSnapshot {
        state.snapshot()
    }

    fn o_state() -> GameState {
        GameState::with_source(COLS, ROWS, SequenceSource::repeat(PieceKind::O))
    }

    #[test]
    fn test_panel_shows_stats() {
        let snap = snapshot_of(&o_state());
        let fb = GameView::default().render(&snap, &[], Viewport::new(80, 30));
        assert!(fb.contains_text("SCORE"));
        assert!(fb.contains_text("LEVEL"));
        assert!(fb.contains_text("LINES"));
        assert!(fb.contains_text("No scores yet"));
        assert!(!fb.contains_text("GAME OVER"));
    }

    #[test]
    fn test_panel_lists_top_five() {
        let snap = snapshot_of(&o_state());
        let entries: Vec<LeaderboardEntry> = (0..7)
            .map(|i| LeaderboardEntry {
                score: 1000 - i * 100,
                date: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
            })
            .collect();
        let fb = GameView::default().render(&snap, &entries, Viewport::new(90, 30));

        assert!(fb.contains_text("1. 1000 pts"));
        assert!(fb.contains_text("5. 600 pts"));
        assert!(!fb.contains_text("6. 500 pts"));
        assert!(!fb.contains_text("No scores yet"));
    }

    #[test]
    fn test_locked_cells_use_palette() {
        let mut state = o_state();
        state.apply_action(GameAction::HardDrop);
        let snap = snapshot_of(&state);

        let view = GameView::default();
        let viewport = Viewport::new(80, 30);
        let fb = view.render(&snap, &[], viewport);

        // Frame origin as computed by render_into.
        let frame_x = (80 - (COLS as u16 * 2 + 2)) / 3;
        let frame_y = (30 - (ROWS as u16 + 2)) / 2;
        let cell = fb.get(frame_x + 1 + 5 * 2, frame_y + 1 + 23).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, kind_color(PieceKind::O));
    }

    #[test]
    fn test_unknown_cell_ids_are_not_drawn() {
        let mut grid = Grid::new(COLS, ROWS);
        grid.set(0, 23, 9);
        let state = GameState::with_grid(grid, SequenceSource::repeat(PieceKind::O));
        let fb = GameView::default().render(&state.snapshot(), &[], Viewport::new(80, 30));

        let frame_x = (80 - (COLS as u16 * 2 + 2)) / 3;
        let frame_y = (30 - (ROWS as u16 + 2)) / 2;
        let cell = fb.get(frame_x + 1, frame_y + 1 + 23).unwrap();
        assert_eq!(cell.ch, ' ');
    }

    #[test]
    fn test_kind_colors_are_distinct() {
        for (i, a) in PieceKind::ALL.iter().enumerate() {
            for b in &PieceKind::ALL[i + 1..] {
                assert_ne!(kind_color(*a), kind_color(*b));
            }
        }
    }

    #[test]
    fn test_game_over_overlay() {
        let mut grid = Grid::new(COLS, ROWS);
        grid.set(5, 0, 1);
        let state = GameState::with_grid(grid, SequenceSource::repeat(PieceKind::O));
        let fb = GameView::default().render(&state.snapshot(), &[], Viewport::new(80, 30));
        assert!(fb.contains_text("GAME OVER"));
        assert!(fb.contains_text("SCORE 0"));
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let snap = snapshot_of(&o_state());
        let view = GameView::default();
        for (w, h) in [(0, 0), (1, 1), (10, 5), (26, 26)] {
            let fb = view.render(&snap, &[], Viewport::new(w, h));
            assert_eq!(fb.width(), w);
            assert_eq!(fb.height(), h);
        }
    }

    #[test]
    fn test_render_into_reuses_framebuffer() {
        let snap = snapshot_of(&o_state());
        let view = GameView::default();
        let mut fb = FrameBuffer::new(80, 30);
        view.render_into(&snap, &[], Viewport::new(80, 30), &mut fb);
        let first = fb.clone();
        view.render_into(&snap, &[], Viewport::new(80, 30), &mut fb);
        assert_eq!(fb, first);
    }
}

use crate::pieces::{Piece, Shape};
use crate::types::{Cell, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl ActiveSnapshot {
    /// Non-empty cells in grid coordinates
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.shape
            .minos()
            .into_iter()
            .map(move |(dx, dy, cell)| (self.x + dx, self.y + dy, cell))
    }
}

/// Read-only view of a game handed to renderers
///
/// The cell buffer is reused by [`GameState::snapshot_into`](crate::GameState::snapshot_into).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Grid cells, row-major
    pub cells: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i32>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Grid cell at `(x, y)`, `None` outside the grid
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    /// Grid rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1))
    }
}

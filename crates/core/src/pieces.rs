//! Pieces module - tetromino shape catalog and the active piece
//!
//! Shapes are square color matrices (side 2, 3 or 4). Every kind has one
//! template; spawning copies it, and rotation always produces a new value, so
//! the catalog can never be altered by gameplay.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind};

/// Largest supported shape side
pub const MAX_SHAPE_SIZE: usize = 4;

/// A non-empty shape cell: `(dx, dy, color)` relative to the shape origin
pub type Mino = (i32, i32, Cell);

/// Non-empty cells of a shape, stack allocated
pub type Minos = ArrayVec<Mino, { MAX_SHAPE_SIZE * MAX_SHAPE_SIZE }>;

/// Square color matrix of side `size`
///
/// Storage always uses a stride of [`MAX_SHAPE_SIZE`]; cells outside
/// `size x size` stay zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [Cell; MAX_SHAPE_SIZE * MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from an `N x N` matrix, rows top to bottom
    pub const fn square<const N: usize>(rows: [[Cell; N]; N]) -> Self {
        let mut cells = [0; MAX_SHAPE_SIZE * MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < N {
            let mut x = 0;
            while x < N {
                cells[y * MAX_SHAPE_SIZE + x] = rows[y][x];
                x += 1;
            }
            y += 1;
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Width of the matrix (equal to its height)
    pub fn width(&self) -> usize {
        self.size()
    }

    /// Cell at `(x, y)`, `0` outside the matrix
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.size() || y >= self.size() {
            return 0;
        }
        self.cells[y * MAX_SHAPE_SIZE + x]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.size() && y < self.size() {
            self.cells[y * MAX_SHAPE_SIZE + x] = cell;
        }
    }

    /// Empty matrix of the same side
    pub(crate) fn blank(&self) -> Self {
        Self {
            size: self.size,
            cells: [0; MAX_SHAPE_SIZE * MAX_SHAPE_SIZE],
        }
    }

    /// Non-empty cells in row-major order
    pub fn minos(&self) -> Minos {
        let mut out = Minos::new();
        for y in 0..self.size() {
            for x in 0..self.size() {
                let cell = self.get(x, y);
                if cell != 0 {
                    out.push((x as i32, y as i32, cell));
                }
            }
        }
        out
    }

    /// Iterate the matrix rows, each `size` cells wide
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        let size = self.size();
        self.cells
            .chunks(MAX_SHAPE_SIZE)
            .take(size)
            .map(move |row| &row[..size])
    }
}

const I_SHAPE: Shape = Shape::square([
    [0, 0, 0, 0],
    [1, 1, 1, 1],
    [0, 0, 0, 0],
    [0, 0, 0, 0],
]);

const J_SHAPE: Shape = Shape::square([
    [2, 0, 0],
    [2, 2, 2],
    [0, 0, 0],
]);

const L_SHAPE: Shape = Shape::square([
    [0, 0, 3],
    [3, 3, 3],
    [0, 0, 0],
]);

const O_SHAPE: Shape = Shape::square([
    [4, 4],
    [4, 4],
]);

const S_SHAPE: Shape = Shape::square([
    [0, 5, 5],
    [5, 5, 0],
    [0, 0, 0],
]);

const T_SHAPE: Shape = Shape::square([
    [0, 6, 0],
    [6, 6, 6],
    [0, 0, 0],
]);

const Z_SHAPE: Shape = Shape::square([
    [7, 7, 0],
    [0, 7, 7],
    [0, 0, 0],
]);

/// Get a fresh copy of the spawn shape for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::Z => Z_SHAPE,
    }
}

/// The falling piece: a shape placed at a grid offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    /// Grid column of the shape's left edge (may be negative)
    pub x: i32,
    /// Grid row of the shape's top edge
    pub y: i32,
}

impl Piece {
    /// Create a piece at the spawn position for a grid `grid_width` cells wide
    pub fn spawn(kind: PieceKind, grid_width: usize) -> Self {
        let shape = get_shape(kind);
        Self {
            kind,
            shape,
            x: (grid_width / 2) as i32 - (shape.width() / 2) as i32,
            y: 0,
        }
    }

    /// Copy of this piece translated by `(dx, dy)`
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Non-empty cells in grid coordinates
    pub fn minos(&self) -> Minos {
        self.shape
            .minos()
            .into_iter()
            .map(|(dx, dy, cell)| (self.x + dx, self.y + dy, cell))
            .collect()
    }
}

//! Grid module - the playfield occupancy matrix
//!
//! The grid is `width x height` color cells stored row-major in a flat vector.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Dimensions are fixed at construction.
//!
//! Bounds are asymmetric on purpose: the side walls and the floor count as
//! occupied, the space above row 0 does not, so a piece may hang partially
//! above the visible field.

use crate::pieces::Piece;
use crate::types::Cell;

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) blocks a piece cell
    ///
    /// Walls (`x` outside `0..width`) and the floor (`y >= height`) are
    /// occupied; rows above the top (`y < 0`) are open.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if x < 0 || x as usize >= self.width {
            return true;
        }
        if y < 0 {
            return false;
        }
        if y as usize >= self.height {
            return true;
        }
        self.cells[y as usize * self.width + x as usize] != 0
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != 0)
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Write the piece's non-empty cells into the grid
    ///
    /// The caller must have checked the piece does not collide; overlapping
    /// cells are overwritten and cells outside the grid are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y, cell) in piece.minos() {
            self.set(x, y, cell);
        }
    }

    /// Remove every full row and return how many were removed
    ///
    /// Rows above a removed row move down by one per removal and empty rows
    /// fill in from the top. Scans bottom to top with a read and a write
    /// cursor, which gives the same result as removing a row and re-checking
    /// the index it vacated.
    pub fn sweep_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut write_y = self.height;
        let mut cleared = 0;

        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(0);
        cleared
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != 0).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Piece;
    use crate::types::PieceKind;

    fn fill_row(grid: &mut Grid, y: i32, color: Cell) {
        for x in 0..grid.width() as i32 {
            grid.set(x, y, color);
        }
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(12, 24);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(11, 0), Some(11));
        assert_eq!(grid.index(0, 1), Some(12));
        assert_eq!(grid.index(11, 23), Some(287));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(12, 0), None);
        assert_eq!(grid.index(0, 24), None);
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(12, 24);
        assert_eq!(grid.cells().len(), 288);
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_bounds_asymmetry() {
        let grid = Grid::new(12, 24);
        // Walls
        assert!(grid.is_occupied(-1, 5));
        assert!(grid.is_occupied(12, 5));
        // Floor
        assert!(grid.is_occupied(5, 24));
        // Above the top is open
        assert!(!grid.is_occupied(5, -1));
        assert!(!grid.is_occupied(0, -3));
        // Walls win above the top as well
        assert!(grid.is_occupied(-1, -1));
    }

    #[test]
    fn test_is_occupied_reads_cells() {
        let mut grid = Grid::new(12, 24);
        assert!(!grid.is_occupied(3, 7));
        grid.set(3, 7, 2);
        assert!(grid.is_occupied(3, 7));
    }

    #[test]
    fn test_merge_writes_colors() {
        let mut grid = Grid::new(12, 24);
        let piece = Piece::spawn(PieceKind::T, 12).shifted(0, 10);
        grid.merge(&piece);
        assert_eq!(grid.filled_count(), 4);
        assert_eq!(grid.get(6, 10), Some(6));
        assert_eq!(grid.get(5, 11), Some(6));
        assert_eq!(grid.get(7, 11), Some(6));
    }

    #[test]
    fn test_merge_skips_cells_above_top() {
        let mut grid = Grid::new(12, 24);
        // I piece cells sit on its second row; y = -1 puts them on row 0.
        let piece = Piece::spawn(PieceKind::I, 12).shifted(0, -1);
        grid.merge(&piece);
        assert_eq!(grid.filled_count(), 4);

        let mut grid = Grid::new(12, 24);
        let piece = Piece::spawn(PieceKind::I, 12).shifted(0, -2);
        grid.merge(&piece);
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_sweep_no_full_rows() {
        let mut grid = Grid::new(12, 24);
        grid.set(0, 23, 1);
        let before = grid.clone();
        assert_eq!(grid.sweep_full_rows(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_sweep_adjacent_full_rows() {
        let mut grid = Grid::new(12, 24);
        fill_row(&mut grid, 23, 1);
        fill_row(&mut grid, 22, 2);
        grid.set(4, 21, 3);

        assert_eq!(grid.sweep_full_rows(), 2);
        assert_eq!(grid.get(4, 23), Some(3));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_sweep_preserves_order_of_remaining_rows() {
        let mut grid = Grid::new(4, 6);
        grid.set(0, 1, 5);
        fill_row(&mut grid, 2, 1);
        grid.set(1, 3, 6);
        fill_row(&mut grid, 4, 1);
        grid.set(2, 5, 7);

        assert_eq!(grid.sweep_full_rows(), 2);
        assert_eq!(grid.get(2, 5), Some(7));
        assert_eq!(grid.get(1, 4), Some(6));
        assert_eq!(grid.get(0, 3), Some(5));
        assert!(grid.rows().take(3).all(|row| row.iter().all(|&c| c == 0)));
    }

    #[test]
    fn test_sweep_full_grid() {
        let mut grid = Grid::new(3, 5);
        for y in 0..5 {
            fill_row(&mut grid, y, 4);
        }
        assert_eq!(grid.sweep_full_rows(), 5);
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::new(12, 24);
        fill_row(&mut grid, 10, 3);
        grid.clear();
        assert_eq!(grid.filled_count(), 0);
        assert_eq!(grid.width(), 12);
        assert_eq!(grid.height(), 24);
    }
}

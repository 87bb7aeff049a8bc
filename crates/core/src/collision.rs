//! Collision module - the single placement predicate
//!
//! Movement, rotation, spawn and lock decisions all go through [`collides`].

use crate::grid::Grid;
use crate::pieces::Piece;

/// Whether any non-empty cell of `piece` lands on a blocked grid position
pub fn collides(grid: &Grid, piece: &Piece) -> bool {
    piece
        .minos()
        .iter()
        .any(|&(x, y, _)| grid.is_occupied(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_spawn_on_empty_grid_is_free() {
        let grid = Grid::new(12, 24);
        for kind in PieceKind::ALL {
            assert!(!collides(&grid, &Piece::spawn(kind, 12)), "{:?}", kind);
        }
    }

    #[test]
    fn test_walls_and_floor_collide() {
        let grid = Grid::new(12, 24);
        let o = Piece::spawn(PieceKind::O, 12);

        assert!(!collides(&grid, &Piece { x: 0, ..o }));
        assert!(collides(&grid, &Piece { x: -1, ..o }));
        assert!(!collides(&grid, &Piece { x: 10, ..o }));
        assert!(collides(&grid, &Piece { x: 11, ..o }));
        assert!(!collides(&grid, &Piece { y: 22, ..o }));
        assert!(collides(&grid, &Piece { y: 23, ..o }));
    }

    #[test]
    fn test_transparent_cells_never_collide() {
        let mut grid = Grid::new(12, 24);
        // T at spawn leaves its top-left corner empty.
        let t = Piece::spawn(PieceKind::T, 12).shifted(0, 5);
        grid.set(t.x, t.y, 1);
        assert!(!collides(&grid, &t));

        grid.set(t.x + 1, t.y, 1);
        assert!(collides(&grid, &t));
    }

    #[test]
    fn test_padding_outside_walls_is_ignored() {
        let grid = Grid::new(12, 24);
        // Vertical I occupies only column 2 of its matrix.
        let mut i = Piece::spawn(PieceKind::I, 12);
        i.shape = crate::rotation::rotate_clockwise(&i.shape);
        assert!(!collides(&grid, &Piece { x: -2, ..i }));
        assert!(collides(&grid, &Piece { x: -3, ..i }));
    }

    #[test]
    fn test_above_top_is_open() {
        let grid = Grid::new(12, 24);
        let o = Piece::spawn(PieceKind::O, 12);
        assert!(!collides(&grid, &Piece { y: -1, ..o }));
    }
}

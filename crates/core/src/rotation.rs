//! Rotation module - clockwise rotation with a horizontal kick search
//!
//! There is no kick table here. A rotated piece that collides is nudged
//! sideways by a growing, sign-alternating step until it fits or the step
//! outgrows the shape.

use crate::collision::collides;
use crate::grid::Grid;
use crate::pieces::{Piece, Shape};

/// Rotate a shape 90° clockwise: `result[x][n - 1 - y] = shape[y][x]`
pub fn rotate_clockwise(shape: &Shape) -> Shape {
    let n = shape.size();
    let mut result = shape.blank();
    for y in 0..n {
        for x in 0..n {
            result.set(n - 1 - y, x, shape.get(x, y));
        }
    }
    result
}

/// Rotate `piece` clockwise, kicking it sideways if needed
///
/// Kick steps run `+1, -2, +3, -4, ...` and accumulate, so the positions
/// probed are `x, x+1, x-1, x+2, x-2, ...`. The search gives up as soon as
/// the *next* step would exceed the shape width. That check happens after
/// the current step has been applied, so the last position reached is never
/// tested: a 3-wide shape probes `x, x+1, x-1, x+2` and stops short of `x-2`.
/// This quirk decides which rotations succeed against walls and is kept as is.
///
/// Returns the rotated piece, or `None` when every probe collides (the caller
/// keeps the original shape and position).
pub fn try_rotate(grid: &Grid, piece: &Piece) -> Option<Piece> {
    let shape = rotate_clockwise(&piece.shape);
    let bound = shape.width() as i32;
    let mut candidate = Piece { shape, ..*piece };
    let mut offset: i32 = 1;

    while collides(grid, &candidate) {
        candidate.x += offset;
        offset = -(offset + offset.signum());
        if offset > bound {
            return None;
        }
    }

    Some(candidate)
}

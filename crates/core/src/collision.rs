//! Collision checking - decides whether a placement is legal
//!
//! A placement is legal when every occupied mask cell lies inside the board
//! columns, above the floor, and on an empty board cell. Cells above the top
//! row (y < 0) skip the occupancy test but not the column test, so pieces can
//! spawn or kick partly off the top while a blocked spawn still fails.

use crate::board::Board;
use crate::catalog::mask_for;
use crate::piece::ActivePiece;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Whether `kind` at `rotation` with its mask origin at `(x, y)` fits.
///
/// Any `i8` origin is accepted; cell coordinates are computed as `i16`.
pub fn is_valid(kind: PieceKind, rotation: Rotation, x: i8, y: i8, board: &Board) -> bool {
    mask_for(kind, rotation).cells().all(|(dx, dy)| {
        let col = i16::from(x) + i16::from(dx);
        let row = i16::from(y) + i16::from(dy);
        if col < 0 || col >= i16::from(BOARD_WIDTH) || row >= i16::from(BOARD_HEIGHT) {
            return false;
        }
        // In range now: 0 <= col < 10 and row < 20.
        row < 0 || board.is_occupied(col as i8, row as i8) == Some(false)
    })
}

/// Whether `piece` fits where it currently is.
pub fn fits(piece: &ActivePiece, board: &Board) -> bool {
    is_valid(piece.kind, piece.rotation, piece.x, piece.y, board)
}

/// Rows the piece can fall before it would collide.
pub fn drop_distance(piece: &ActivePiece, board: &Board) -> i8 {
    let mut distance: i8 = 0;
    while let Some(next) = distance.checked_add(1) {
        match piece.y.checked_add(next) {
            Some(y) if is_valid(piece.kind, piece.rotation, piece.x, y, board) => distance = next,
            _ => break,
        }
    }
    distance
}

/// Where the piece would land if hard-dropped now.
pub fn landing(piece: &ActivePiece, board: &Board) -> ActivePiece {
    piece.shifted(0, drop_distance(piece, board))
}

//! Rotation with single-cell kicks
//!
//! A clockwise turn is tried in place, then one column left, one column
//! right, and one row up. The first placement that fits wins. This is the
//! game's own small kick set, not a standard rotation system's tables.

use crate::board::Board;
use crate::collision::is_valid;
use crate::piece::ActivePiece;

/// Origin offsets `(dx, dy)` tried in order for a rotation.
pub const KICK_OFFSETS: [(i8, i8); 4] = [(0, 0), (-1, 0), (1, 0), (0, -1)];

/// Rotate `piece` clockwise in place, kicking if needed.
///
/// Returns false and leaves the piece untouched when no offset fits.
pub fn try_rotate(piece: &mut ActivePiece, board: &Board) -> bool {
    let rotation = piece.rotation.rotate_cw();
    for &(dx, dy) in KICK_OFFSETS.iter() {
        let (Some(x), Some(y)) = (piece.x.checked_add(dx), piece.y.checked_add(dy)) else {
            continue;
        };
        if is_valid(piece.kind, rotation, x, y, board) {
            piece.rotation = rotation;
            piece.x = x;
            piece.y = y;
            return true;
        }
    }
    false
}

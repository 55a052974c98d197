//! Active piece - a food kind placed on the board at an origin and rotation

use serde::Serialize;

use crate::catalog::{mask_for, RotationMask};
use crate::types::{PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// The piece under player control (or a preview/ghost copy of it).
///
/// `(x, y)` is the top-left corner of the 5x5 mask on the board; mask cells
/// are offset from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// New piece at the spawn origin, rotation 0.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn mask(&self) -> &'static RotationMask {
        mask_for(self.kind, self.rotation)
    }

    /// Absolute `(x, y)` board coordinates of every occupied cell.
    ///
    /// Coordinates saturate at the `i8` range.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.mask()
            .cells()
            .map(move |(dx, dy)| (x.saturating_add(dx), y.saturating_add(dy)))
    }

    /// Copy shifted by `(dx, dy)`, saturating at the `i8` range.
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }
}

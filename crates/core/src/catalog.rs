//! Shape catalog - hand-authored 5x5 rotation masks for every food piece
//!
//! Masks are written as rows of `'X'` (occupied) and `'.'` (empty) and turned
//! into boolean grids at compile time. They are not derived by rotating a base
//! shape: several kinds repeat a mask across rotations, and the offsets inside
//! the 5x5 box shape how kicks behave, so the tables must stay as authored.
//!
//! Coordinates inside a mask are `(col, row)`, both in `0..5`, relative to the
//! piece origin.

use crate::types::{PieceKind, Rotation, MASK_SIZE};

/// Occupancy grid for one kind at one rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RotationMask {
    rows: [[bool; MASK_SIZE]; MASK_SIZE],
}

impl RotationMask {
    /// Build a mask from five rows of `'X'`/`'.'`.
    ///
    /// Panics (at compile time when used in a const) on malformed rows.
    pub const fn parse(rows: [&str; MASK_SIZE]) -> Self {
        let mut out = [[false; MASK_SIZE]; MASK_SIZE];
        let mut r = 0;
        while r < MASK_SIZE {
            let bytes = rows[r].as_bytes();
            assert!(bytes.len() == MASK_SIZE, "mask rows must be 5 wide");
            let mut c = 0;
            while c < MASK_SIZE {
                out[r][c] = match bytes[c] {
                    b'X' => true,
                    b'.' => false,
                    _ => panic!("mask cells must be 'X' or '.'"),
                };
                c += 1;
            }
            r += 1;
        }
        Self { rows: out }
    }

    /// Whether the cell at `(col, row)` is occupied. Out-of-range is empty.
    pub fn is_set(&self, col: usize, row: usize) -> bool {
        row < MASK_SIZE && col < MASK_SIZE && self.rows[row][col]
    }

    /// Occupied cells as `(col, row)` offsets, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|(_, &set)| set)
                .map(move |(col, _)| (col as i8, row as i8))
        })
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.rows.iter().flatten().filter(|&&set| set).count()
    }

    pub fn rows(&self) -> &[[bool; MASK_SIZE]; MASK_SIZE] {
        &self.rows
    }
}

type KindMasks = [RotationMask; 4];

const FRIES: KindMasks = [
    RotationMask::parse([".....", ".....", "XXXX.", ".....", "....."]),
    RotationMask::parse(["..X..", "..X..", "..X..", "..X..", "....."]),
    RotationMask::parse([".....", ".....", "XXXX.", ".....", "....."]),
    RotationMask::parse(["..X..", "..X..", "..X..", "..X..", "....."]),
];

const BURGER: KindMasks = [
    RotationMask::parse([".....", ".....", ".XX..", ".XX..", "....."]),
    RotationMask::parse([".....", ".....", ".XX..", ".XX..", "....."]),
    RotationMask::parse([".....", ".....", ".XX..", ".XX..", "....."]),
    RotationMask::parse([".....", ".....", ".XX..", ".XX..", "....."]),
];

const CHICKEN: KindMasks = [
    RotationMask::parse([".....", "..X..", ".XXX.", ".....", "....."]),
    RotationMask::parse([".....", "..X..", ".XX..", "..X..", "....."]),
    RotationMask::parse([".....", ".....", ".XXX.", "..X..", "....."]),
    RotationMask::parse([".....", "..X..", "..XX.", "..X..", "....."]),
];

const BANANA: KindMasks = [
    RotationMask::parse([".....", "...X.", ".XXX.", ".....", "....."]),
    RotationMask::parse([".....", ".XX..", "..X..", "..X..", "....."]),
    RotationMask::parse([".....", ".....", ".XXX.", ".X...", "....."]),
    RotationMask::parse([".....", "..X..", "..X..", "..XX.", "....."]),
];

const CARROT: KindMasks = [
    RotationMask::parse([".....", ".X...", ".XXX.", ".....", "....."]),
    RotationMask::parse([".....", "..X..", "..X..", ".XX..", "....."]),
    RotationMask::parse([".....", ".....", ".XXX.", "...X.", "....."]),
    RotationMask::parse([".....", ".XX..", ".X...", ".X...", "....."]),
];

const PRETZEL: KindMasks = [
    RotationMask::parse([".....", ".....", "..XX.", ".XX..", "....."]),
    RotationMask::parse([".....", ".X...", ".XX..", "..X..", "....."]),
    RotationMask::parse([".....", ".....", "..XX.", ".XX..", "....."]),
    RotationMask::parse([".....", ".X...", ".XX..", "..X..", "....."]),
];

const PASTA: KindMasks = [
    RotationMask::parse([".....", ".....", ".XX..", "..XX.", "....."]),
    RotationMask::parse([".....", "..X..", ".XX..", ".X...", "....."]),
    RotationMask::parse([".....", ".....", ".XX..", "..XX.", "....."]),
    RotationMask::parse([".....", "..X..", ".XX..", ".X...", "....."]),
];

/// Mask for a kind at a rotation.
pub fn mask_for(kind: PieceKind, rotation: Rotation) -> &'static RotationMask {
    let masks: &'static KindMasks = match kind {
        PieceKind::Fries => &FRIES,
        PieceKind::Burger => &BURGER,
        PieceKind::Chicken => &CHICKEN,
        PieceKind::Banana => &BANANA,
        PieceKind::Carrot => &CARROT,
        PieceKind::Pretzel => &PRETZEL,
        PieceKind::Pasta => &PASTA,
    };
    &masks[rotation.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mask_has_four_cells() {
        for kind in PieceKind::ALL {
            for r in 0..4 {
                let mask = mask_for(kind, Rotation::from_index(r));
                assert_eq!(mask.count(), 4, "{:?} rotation {}", kind, r);
                assert_eq!(mask.cells().count(), 4);
            }
        }
    }

    #[test]
    fn fries_north_is_horizontal_on_row_two() {
        let cells: Vec<_> = mask_for(PieceKind::Fries, Rotation::North).cells().collect();
        assert_eq!(cells, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn fries_east_is_vertical_on_column_two() {
        let cells: Vec<_> = mask_for(PieceKind::Fries, Rotation::East).cells().collect();
        assert_eq!(cells, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn burger_is_identical_in_every_rotation() {
        let north = mask_for(PieceKind::Burger, Rotation::North);
        for r in 1..4 {
            assert_eq!(mask_for(PieceKind::Burger, Rotation::from_index(r)), north);
        }
    }

    #[test]
    fn chicken_masks_are_distinct() {
        let masks: Vec<_> = (0..4)
            .map(|r| *mask_for(PieceKind::Chicken, Rotation::from_index(r)))
            .collect();
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_ne!(masks[i], masks[j]);
            }
        }
    }

    #[test]
    fn is_set_rejects_out_of_range() {
        let mask = mask_for(PieceKind::Chicken, Rotation::North);
        assert!(mask.is_set(2, 1));
        assert!(!mask.is_set(0, 0));
        assert!(!mask.is_set(5, 1));
        assert!(!mask.is_set(1, 9));
    }
}

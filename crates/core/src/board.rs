//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that locked there. Uses a flat array for cache locality and zero
//! allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). Row -1 is the spawn margin directly above the grid: it has
//! no storage and always reads as empty.

use crate::piece::ActivePiece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Occupancy of (x, y).
    ///
    /// Returns None when the coordinate is outside the grid and not in the
    /// spawn margin row; the margin always reads as empty.
    pub fn is_occupied(&self, x: i8, y: i8) -> Option<bool> {
        if y == -1 && (0..BOARD_WIDTH as i8).contains(&x) {
            return Some(false);
        }
        self.get(x, y).map(|cell| cell.is_some())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Cells of row `y`. Panics if `y` is out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(BOARD_WIDTH as usize)
    }

    /// Write the piece's kind into every cell its mask covers.
    ///
    /// Cells above the top row are dropped. The caller must only merge a piece
    /// whose cells are in bounds and free; anything else is a bug and panics.
    pub fn merge(&mut self, piece: &ActivePiece) {
        for (x, y) in piece.cells() {
            if y < 0 {
                continue;
            }
            let Some(idx) = Self::index(x, y) else {
                panic!("merge outside the board at ({}, {})", x, y);
            };
            assert!(
                self.cells[idx].is_none(),
                "merge into occupied cell ({}, {})",
                x,
                y
            );
            self.cells[idx] = Some(piece.kind);
        }
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Two-pointer compaction from the bottom up; rows above a removed row
    /// slide down and the vacated top rows are emptied.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut cleared = 0;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of occupied cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Copy into a row-major 2D grid for snapshots.
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

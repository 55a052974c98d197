//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the game.
//! All types are plain data with no behaviour beyond conversions, so they can
//! be shared by the engine, the terminal front end and the event log alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn origin**: (`BOARD_WIDTH / 2 - 2`, 0) = (3, 0)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval (~60 FPS) |
//! | `DEFAULT_FALL_INTERVAL_MS` | 1000 | Automatic fall, one row per second |
//! | `DEFAULT_SOFT_DROP_INTERVAL_MS` | 16 | Fall interval while soft drop is held |
//! | `DEFAULT_LOCK_DELAY_MS` | 500 | Grace period once a piece cannot fall |
//! | `DEFAULT_HORIZONTAL_REPEAT_MS` | 100 | Auto-repeat for a held direction key |
//!
//! # Examples
//!
//! ```
//! use food_tetris_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::Chicken;
//! assert_eq!(piece.shape_letter(), 'T');
//! assert_eq!(PieceKind::from_str("chicken"), Some(piece));
//!
//! assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
//! assert_eq!(Rotation::from_index(5), Rotation::East);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of a rotation mask (5x5)
pub const MASK_SIZE: usize = 5;

/// Spawn column: the mask's origin sits two columns left of the board centre.
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Spawn row
pub const SPAWN_Y: i8 = 0;

/// Frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Automatic fall interval (one row per second)
pub const DEFAULT_FALL_INTERVAL_MS: u32 = 1000;

/// Fall interval while soft drop is held
pub const DEFAULT_SOFT_DROP_INTERVAL_MS: u32 = 16;

/// Lock delay once a piece can no longer fall
pub const DEFAULT_LOCK_DELAY_MS: u32 = 500;

/// Repeat interval for a held horizontal direction
pub const DEFAULT_HORIZONTAL_REPEAT_MS: u32 = 100;

/// Number of upcoming pieces shown by default
pub const DEFAULT_PREVIEW_LEN: usize = 3;

/// Upper bound on the preview queue length
pub const MAX_PREVIEW: usize = 6;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Fullness gained per cleared line
pub const FULLNESS_PER_LINE: u32 = 20;

/// Fullness at which the feast mode is won
pub const DEFAULT_FULLNESS_TARGET: u32 = 100;

/// Survival time after which the feast mode is won (3 minutes)
pub const DEFAULT_SURVIVAL_LIMIT_MS: u32 = 180_000;

/// Line clear scoring table, indexed by rows cleared at once.
///
/// Points are multiplied by the current level (which starts at 1).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];


/// The seven food pieces.
///
/// Each food stands in for one classic tetromino shape family:
/// - **Fries**: I, long bar
/// - **Burger**: O, 2x2 square
/// - **Chicken**: T
/// - **Banana**: L
/// - **Carrot**: J
/// - **Pretzel**: S
/// - **Pasta**: Z
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Fries,
    Burger,
    Chicken,
    Banana,
    Carrot,
    Pretzel,
    Pasta,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Fries,
        PieceKind::Burger,
        PieceKind::Chicken,
        PieceKind::Banana,
        PieceKind::Carrot,
        PieceKind::Pretzel,
        PieceKind::Pasta,
    ];

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::Fries => 0,
            PieceKind::Burger => 1,
            PieceKind::Chicken => 2,
            PieceKind::Banana => 3,
            PieceKind::Carrot => 4,
            PieceKind::Pretzel => 5,
            PieceKind::Pasta => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse piece kind from its name, label or shape letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use food_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("fries"), Some(PieceKind::Fries));
    /// assert_eq!(PieceKind::from_str("cheeseburger"), Some(PieceKind::Burger));
    /// assert_eq!(PieceKind::from_str("Z"), Some(PieceKind::Pasta));
    /// assert_eq!(PieceKind::from_str("pizza"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fries" | "i" => Some(PieceKind::Fries),
            "burger" | "cheeseburger" | "o" => Some(PieceKind::Burger),
            "chicken" | "t" => Some(PieceKind::Chicken),
            "banana" | "l" => Some(PieceKind::Banana),
            "carrot" | "j" => Some(PieceKind::Carrot),
            "pretzel" | "s" => Some(PieceKind::Pretzel),
            "pasta" | "z" => Some(PieceKind::Pasta),
            _ => None,
        }
    }

    /// Lower-case identifier, stable across releases.
    pub fn name(&self) -> &'static str {
        match self {
            PieceKind::Fries => "fries",
            PieceKind::Burger => "burger",
            PieceKind::Chicken => "chicken",
            PieceKind::Banana => "banana",
            PieceKind::Carrot => "carrot",
            PieceKind::Pretzel => "pretzel",
            PieceKind::Pasta => "pasta",
        }
    }

    /// Display label drawn on the piece.
    pub fn label(&self) -> &'static str {
        match self {
            PieceKind::Fries => "Fries",
            PieceKind::Burger => "Burger",
            PieceKind::Chicken => "Chicken",
            PieceKind::Banana => "Banana",
            PieceKind::Carrot => "Carrot",
            PieceKind::Pretzel => "Pretzel",
            PieceKind::Pasta => "Pasta",
        }
    }

    /// Base colour as an RGB triple.
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::Fries => (255, 215, 0),
            PieceKind::Burger => (139, 69, 19),
            PieceKind::Chicken => (210, 180, 140),
            PieceKind::Banana => (255, 223, 0),
            PieceKind::Carrot => (255, 140, 0),
            PieceKind::Pretzel => (139, 69, 19),
            PieceKind::Pasta => (255, 248, 220),
        }
    }

    /// Classic tetromino letter for this food.
    pub fn shape_letter(&self) -> char {
        match self {
            PieceKind::Fries => 'I',
            PieceKind::Burger => 'O',
            PieceKind::Chicken => 'T',
            PieceKind::Banana => 'L',
            PieceKind::Carrot => 'J',
            PieceKind::Pretzel => 'S',
            PieceKind::Pasta => 'Z',
        }
    }
}

/// Rotation states, indexed 0..=3.
///
/// - **North**: spawn orientation (index 0)
/// - **East**: one clockwise turn (index 1)
/// - **South**: two turns (index 2)
/// - **West**: three turns (index 3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise, wrapping West back to North.
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for an arbitrary index, taken mod 4.
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }
}

/// Discrete commands fed into the game session.
///
/// Each one is silently ignored when it is not legal in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Begin soft drop: step down now, then fall at the soft-drop interval
    SoftDropStart,
    /// End soft drop and return to the normal fall interval
    SoftDropStop,
    /// Rotate piece 90° clockwise, with kicks
    RotateCw,
    /// Drop to the lowest valid row and lock immediately
    HardDrop,
    /// Swap the active piece with the held slot (once per piece)
    Hold,
    /// Toggle pause
    Pause,
    /// Start over after the game has ended
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use food_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("softdropstart"), Some(GameAction::SoftDropStart));
    /// assert_eq!(GameAction::from_str("rotateCcw"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdropstart" => Some(GameAction::SoftDropStart),
            "softdropstop" => Some(GameAction::SoftDropStop),
            "rotatecw" => Some(GameAction::RotateCw),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDropStart => "softDropStart",
            GameAction::SoftDropStop => "softDropStop",
            GameAction::RotateCw => "rotateCw",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(PieceKind)`: filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Record of one piece locking into the board.
///
/// Emitted by the session on every commit and drained by observers
/// (the event log, tests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    /// Points awarded for this lock.
    pub points: u32,
    /// Totals after the lock.
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fullness: u32,
    /// The next spawn collided.
    pub game_over: bool,
    /// The fullness target was reached.
    pub won: bool,
}

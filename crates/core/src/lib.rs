//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the food falling-block game: the shape
//! catalog, the board, legality checks, rotation kicks, scoring and the
//! session state machine. It has **zero dependencies** on the terminal or
//! any other I/O, so it is:
//!
//! - **Deterministic**: Same seed (or scripted source) produces identical games
//! - **Testable**: Every rule is covered by unit tests
//! - **Portable**: Can run headless, in a terminal, or behind any other front end
//!
//! # Module Structure
//!
//! - [`catalog`]: hand-authored 5x5 rotation masks for the seven foods
//! - [`piece`]: the active piece (kind, rotation, origin)
//! - [`board`]: 10x20 grid with merge and line clearing
//! - [`collision`]: placement legality, drop distance, landing position
//! - [`rotation`]: clockwise rotation with a four-step kick list
//! - [`sequencer`]: random or scripted piece source, preview queue, hold slot
//! - [`scoring`]: line table, levels and the fullness meter
//! - [`config`]: timings, preview length and win conditions
//! - [`session`]: the playable state machine driven by actions and elapsed time
//! - [`snapshot`]: owned copy of session state for rendering and logging
//!
//! # Game Rules
//!
//! - **Uniform draws**: each kind is drawn independently (no bag)
//! - **Kicks**: a blocked rotation tries left, right, then up by one cell
//! - **Lock delay**: 500ms once the piece cannot fall; moving or rotating
//!   successfully disarms it
//! - **Hold**: once per piece, re-enabled when the piece locks
//! - **Scoring**: 100/300/500/800 times the level, level = lines / 10 + 1
//!
//! # Example
//!
//! ```
//! use food_tetris_core::GameSession;
//! use food_tetris_types::GameAction;
//!
//! let mut game = GameSession::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // One piece locked, the next one is in play.
//! assert_eq!(game.board().filled_count(), 4);
//! assert!(game.active().is_some());
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::advance`](session::GameSession::advance) every frame
//! with the elapsed milliseconds. The piece falls one row per fall interval
//! (1000ms, or 16ms while soft drop is held).

pub mod board;
pub mod catalog;
pub mod collision;
pub mod config;
pub mod piece;
pub mod rotation;
pub mod scoring;
pub mod sequencer;
pub mod session;
pub mod snapshot;

pub use food_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use catalog::{mask_for, RotationMask};
pub use collision::{drop_distance, fits, is_valid, landing};
pub use config::GameConfig;
pub use piece::ActivePiece;
pub use rotation::{try_rotate, KICK_OFFSETS};
pub use scoring::{level_for_lines, line_clear_score, Progress};
pub use sequencer::{HoldSwap, PieceSource, RandomSource, ScriptedSource, Sequencer};
pub use session::GameSession;
pub use snapshot::{BoardGrid, GameSnapshot, TimersSnapshot};

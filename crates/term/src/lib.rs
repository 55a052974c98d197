//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: snapshots are drawn into a plain
//! framebuffer which is then flushed to the terminal, with no widget or
//! layout library in between.
//!
//! - [`fb`]: styled character cells
//! - [`game_view`]: pure snapshot-to-framebuffer mapping (board, food
//!   colours and labels, side panel, overlays)
//! - [`renderer`]: crossterm output with diffing between frames

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use food_tetris_core as core;
pub use food_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

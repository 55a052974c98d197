//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`] and tracks held keys for
//! horizontal repeat and soft drop, including on terminals without
//! key-release events.

pub mod handler;
pub mod map;

pub use food_tetris_types as types;

pub use handler::{is_held_key, HorizontalDirection, InputHandler};
pub use map::{handle_key_event, should_quit};

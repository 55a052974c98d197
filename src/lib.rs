//! Food Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `food_tetris::{core,input,term,types}`
//! and adds the pieces only the binary needs: environment settings and the
//! JSON-lines event log.

pub mod event_log;
pub mod settings;

pub use food_tetris_core as core;
pub use food_tetris_input as input;
pub use food_tetris_term as term;
pub use food_tetris_types as types;

pub use event_log::EventLog;
pub use settings::{Mode, Settings};

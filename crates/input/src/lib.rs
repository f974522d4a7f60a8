//! Terminal input module.
//!
//! Maps `crossterm` key events into [`Command`]s. The host decides what a
//! command does; this crate knows nothing about game state.

pub mod map;

pub use matris_types as types;

pub use map::{map_key, should_quit, Command};

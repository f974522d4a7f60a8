//! Matris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name: `matris::{core, input, term, types}`.
//! The terminal host binary lives in `src/main.rs`.

pub mod event_log;

pub use matris_core as core;
pub use matris_input as input;
pub use matris_term as term;
pub use matris_types as types;

//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the grid/piece simulation and the game loop. It has no
//! dependency on a terminal, a clock or any other I/O; the host drives it by
//! calling [`GameState::tick`] with elapsed milliseconds and forwarding
//! player input.
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 cell matrix, full-row detection and row collapse
//! - [`piece`]: shape templates, spawn anchors and the active piece
//! - [`movement`]: all-or-nothing shift and rotate against the grid
//! - [`spawner`]: next-shape selection and spawn-blocked detection
//! - [`scoring`]: row-clear points, levels and gravity speed
//! - [`game_state`]: the game loop state machine
//! - [`game`]: listener registration on top of [`GameState`]
//!
//! # Example
//!
//! ```
//! use matris_core::{Game, GameConfig};
//! use matris_core::types::{Phase, ShiftDirection};
//!
//! let mut game = Game::new(GameConfig::default(), 12345);
//! game.on_game_over(|score| println!("final score {score}"));
//!
//! game.start();
//! assert_eq!(game.state().phase(), Phase::Falling);
//!
//! game.request_move(ShiftDirection::Left);
//! game.tick(800); // one gravity step
//! ```

pub mod config;
pub mod game;
pub mod game_state;
pub mod grid;
pub mod movement;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod spawner;
pub mod timer;

pub use matris_types as types;

pub use config::GameConfig;
pub use game::Game;
pub use game_state::GameState;
pub use grid::{Block, Cell, Grid, Probe};
pub use movement::{Collision, MoveOutcome, Playfield};
pub use piece::{spawn_cells, template, Piece, ShapeTemplate};
pub use rng::SimpleRng;
pub use scoring::{level_for_score, row_clear_score, LevelUp, ScoreState};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use spawner::Spawner;
pub use timer::IntervalTimer;

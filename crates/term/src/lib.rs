//! Terminal renderer for the game.
//!
//! Rendering goes through a plain framebuffer: [`GameView`] paints a
//! [`GameSnapshot`](matris_core::GameSnapshot) into a [`FrameBuffer`], and
//! [`TerminalRenderer`] flushes it with crossterm, sending only changed cells.
//! The core never touches the terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use matris_core as core;
pub use matris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};

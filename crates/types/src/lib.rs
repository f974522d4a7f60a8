//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the simulation core, the
//! terminal view, and the input mapping alike.
//!
//! # Board Dimensions
//!
//! The playfield is fixed:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn anchor**: (3, 0) for most shapes, (3, 1) for L, (4, 0) for O
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TICK_MS` | 800 | Initial gravity interval |
//! | `SPAWN_CHECK_MS` | 10 | Spawn-fail poll interval |
//! | `FRAME_MS` | 16 | Host frame pacing (~60 FPS) |
//! | `MIN_TICK_MS` | 1 | Floor for the halving gravity interval |
//!
//! # Scoring
//!
//! Clearing `n` rows at once awards `100 * 2^(n-1)` points. Levels start at 1
//! and follow `ceil(score / 1000)`; entering an odd level halves the gravity
//! interval.
//!
//! # Examples
//!
//! ```
//! use matris_types::{Move, RotateDirection, ShapeKind, ShiftDirection, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let shape: ShapeKind = "square".parse().unwrap();
//! assert_eq!(shape, ShapeKind::O);
//!
//! let mv = Move::parse("rotate", "ccw").unwrap();
//! assert_eq!(mv, Move::Rotate(RotateDirection::Ccw));
//!
//! assert!("up".parse::<ShiftDirection>().is_err());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Initial gravity interval (800ms per row)
pub const BASE_TICK_MS: u32 = 800;

/// Floor for the gravity interval once levels start halving it
pub const MIN_TICK_MS: u32 = 1;

/// Spawn-fail poll interval
pub const SPAWN_CHECK_MS: u32 = 10;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Pixel edge length of one block, for pixel-based renderers
pub const BLOCK_PX: u32 = 40;

/// Points for a single cleared row; each extra simultaneous row doubles it
pub const ROW_CLEAR_BASE_SCORE: u32 = 100;

/// Score span of one level
pub const LEVEL_SCORE_STEP: u32 = 1000;

/// Level at game start
pub const FIRST_LEVEL: u32 = 1;


/// The seven tetromino shapes
///
/// Each shape has a fixed color:
/// - **I**: Cyan, four in a row
/// - **L**: Orange
/// - **J**: Blue (mirror of L)
/// - **O**: Yellow, 2x2 square (never rotates)
/// - **S**: Lime
/// - **Z**: Red (mirror of S)
/// - **T**: Magenta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShapeKind {
    I,
    L,
    J,
    O,
    S,
    Z,
    T,
}

impl ShapeKind {
    /// All shapes, in draw order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::T,
    ];

    /// Convert to lowercase letter
    ///
    /// # Examples
    ///
    /// ```
    /// use matris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_str(), "i");
    /// assert_eq!(ShapeKind::O.as_str(), "o");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::O => "o",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::T => "t",
        }
    }

    /// Compact board encoding (1..=7); 0 is reserved for an empty cell.
    pub fn code(&self) -> u8 {
        match self {
            ShapeKind::I => 1,
            ShapeKind::L => 2,
            ShapeKind::J => 3,
            ShapeKind::O => 4,
            ShapeKind::S => 5,
            ShapeKind::Z => 6,
            ShapeKind::T => 7,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ShapeKind::I),
            2 => Some(ShapeKind::L),
            3 => Some(ShapeKind::J),
            4 => Some(ShapeKind::O),
            5 => Some(ShapeKind::S),
            6 => Some(ShapeKind::Z),
            7 => Some(ShapeKind::T),
            _ => None,
        }
    }

    pub fn color(&self) -> BlockColor {
        match self {
            ShapeKind::I => BlockColor::Cyan,
            ShapeKind::L => BlockColor::Orange,
            ShapeKind::J => BlockColor::Blue,
            ShapeKind::O => BlockColor::Yellow,
            ShapeKind::S => BlockColor::Lime,
            ShapeKind::Z => BlockColor::Red,
            ShapeKind::T => BlockColor::Magenta,
        }
    }
}

impl FromStr for ShapeKind {
    type Err = GameError;

    /// Parse a shape tag (case-insensitive).
    ///
    /// Accepts single letters as well as the long tags `line`, `lBlock`,
    /// `jBlock`, `square`, `sBlock`, `zBlock` and `tBlock`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "i" | "line" => Ok(ShapeKind::I),
            "l" | "lblock" => Ok(ShapeKind::L),
            "j" | "jblock" => Ok(ShapeKind::J),
            "o" | "square" => Ok(ShapeKind::O),
            "s" | "sblock" => Ok(ShapeKind::S),
            "z" | "zblock" => Ok(ShapeKind::Z),
            "t" | "tblock" => Ok(ShapeKind::T),
            _ => Err(GameError::InvalidDirection(s.to_string())),
        }
    }
}

/// Display color of a block. Rendering only; never consulted by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockColor {
    Cyan,
    Orange,
    Blue,
    Yellow,
    Lime,
    Red,
    Magenta,
}

impl BlockColor {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            BlockColor::Cyan => (0, 255, 255),
            BlockColor::Orange => (255, 165, 0),
            BlockColor::Blue => (50, 50, 255),
            BlockColor::Yellow => (255, 255, 0),
            BlockColor::Lime => (0, 255, 0),
            BlockColor::Red => (255, 0, 0),
            BlockColor::Magenta => (255, 0, 255),
        }
    }
}

/// A grid coordinate. `x` grows to the right, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
}

impl Pos {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether the coordinate lies on the 10x20 board.
    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < BOARD_WIDTH as i8 && self.y >= 0 && self.y < BOARD_HEIGHT as i8
    }
}

/// Translation directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShiftDirection {
    Left,
    Right,
    Down,
}

impl ShiftDirection {
    /// Unit step `(dx, dy)` for this direction.
    pub fn delta(&self) -> (i8, i8) {
        match self {
            ShiftDirection::Left => (-1, 0),
            ShiftDirection::Right => (1, 0),
            ShiftDirection::Down => (0, 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftDirection::Left => "left",
            ShiftDirection::Right => "right",
            ShiftDirection::Down => "down",
        }
    }
}

impl FromStr for ShiftDirection {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(ShiftDirection::Left),
            "right" => Ok(ShiftDirection::Right),
            "down" => Ok(ShiftDirection::Down),
            _ => Err(GameError::InvalidDirection(s.to_string())),
        }
    }
}

/// Rotation directions about the pivot block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RotateDirection {
    /// Clockwise: (dx, dy) -> (-dy, dx)
    Cw,
    /// Counter-clockwise: (dx, dy) -> (dy, -dx)
    Ccw,
}

impl RotateDirection {
    /// Apply the fixed 2x2 rotation matrix to an offset from the pivot.
    ///
    /// # Examples
    ///
    /// ```
    /// use matris_types::RotateDirection;
    ///
    /// // One step right of the pivot ends up one step below it.
    /// assert_eq!(RotateDirection::Cw.rotate_offset(1, 0), (0, 1));
    /// assert_eq!(RotateDirection::Ccw.rotate_offset(1, 0), (0, -1));
    /// ```
    pub fn rotate_offset(&self, dx: i8, dy: i8) -> (i8, i8) {
        match self {
            RotateDirection::Cw => (-dy, dx),
            RotateDirection::Ccw => (dy, -dx),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RotateDirection::Cw => "cw",
            RotateDirection::Ccw => "ccw",
        }
    }
}

impl FromStr for RotateDirection {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cw" => Ok(RotateDirection::Cw),
            "ccw" => Ok(RotateDirection::Ccw),
            _ => Err(GameError::InvalidDirection(s.to_string())),
        }
    }
}

/// A single movement request against the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Move {
    Shift(ShiftDirection),
    Rotate(RotateDirection),
}

impl Move {
    /// Parse a `(kind, direction)` tag pair such as `("shift", "left")` or
    /// `("rotate", "ccw")`.
    pub fn parse(kind: &str, dir: &str) -> Result<Self, GameError> {
        match kind.to_lowercase().as_str() {
            "shift" => dir.parse().map(Move::Shift),
            "rotate" => dir.parse().map(Move::Rotate),
            _ => Err(GameError::InvalidDirection(kind.to_string())),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Shift(d) => write!(f, "shift {}", d.as_str()),
            Move::Rotate(d) => write!(f, "rotate {}", d.as_str()),
        }
    }
}

/// Game loop states
///
/// `Spawning`, `Locking` and `Clearing` are transient: the loop passes
/// through them inside a single step and comes to rest in `Falling`,
/// `Idle` or `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Idle,
    Spawning,
    Falling,
    Locking,
    Clearing,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Spawning => "spawning",
            Phase::Falling => "falling",
            Phase::Locking => "locking",
            Phase::Clearing => "clearing",
            Phase::GameOver => "game_over",
        }
    }
}

/// Notifications emitted by the core for the surrounding collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Grid contents or active piece cells changed; redraw.
    CellsChanged,
    /// Score state changed after a row clear.
    ScoreChanged {
        score: u32,
        rows_cleared: u32,
        level: u32,
    },
    /// Level increased; `tick_interval_ms` is the interval now in effect.
    LevelUp { level: u32, tick_interval_ms: u32 },
    /// Spawn was blocked. Both timers are stopped.
    GameOver { final_score: u32 },
}

/// Errors surfaced by the core
///
/// None of these are fatal: `OutOfBounds` is a blocked move, `InvalidDirection`
/// leaves state untouched, and `SpawnBlocked` becomes the game-over transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: i8, y: i8 },
    #[error("unrecognized tag: {0:?}")]
    InvalidDirection(String),
    #[error("spawn blocked, final score {final_score}")]
    SpawnBlocked { final_score: u32 },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

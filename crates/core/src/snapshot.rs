use crate::piece::Piece;
use crate::types::{Phase, Pos, ShapeKind, BASE_TICK_MS, BOARD_HEIGHT, BOARD_WIDTH, FIRST_LEVEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub id: u32,
    pub kind: ShapeKind,
    pub cells: [Pos; 4],
    pub pivot: Option<usize>,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            id: value.id(),
            kind: value.kind(),
            cells: *value.cells(),
            pivot: value.pivot_index(),
        }
    }
}

/// Everything a renderer or display needs, by value.
///
/// `board` holds shape codes (0 = empty) and already includes the active
/// piece's cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub next: ShapeKind,
    pub phase: Phase,
    pub paused: bool,
    pub episode_id: u32,
    pub score: u32,
    pub rows_cleared: u32,
    pub level: u32,
    pub tick_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn cell(&self, x: i8, y: i8) -> Option<ShapeKind> {
        if !Pos::new(x, y).in_bounds() {
            return None;
        }
        ShapeKind::from_code(self.board[y as usize][x as usize])
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Falling && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: ShapeKind::I,
            phase: Phase::Idle,
            paused: false,
            episode_id: 0,
            score: 0,
            rows_cleared: 0,
            level: FIRST_LEVEL,
            tick_interval_ms: BASE_TICK_MS,
        }
    }
}

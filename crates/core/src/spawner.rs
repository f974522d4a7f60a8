//! Spawner - picks shapes and places new pieces at the top of the grid
//!
//! The next shape is drawn one piece ahead so the spawn-fail poll can test
//! its cells before it is needed, and so views can preview it.

use crate::grid::{Grid, Probe};
use crate::movement::Playfield;
use crate::piece::{spawn_cells, Piece};
use crate::rng::SimpleRng;
use crate::types::{GameError, ShapeKind};

#[derive(Debug, Clone)]
pub struct Spawner {
    rng: SimpleRng,
    next: ShapeKind,
    next_id: u32,
}

impl Spawner {
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = rng.next_shape();
        Self {
            rng,
            next,
            next_id: 1,
        }
    }

    /// The shape the next spawn will use
    pub fn peek(&self) -> ShapeKind {
        self.next
    }

    /// Replace the upcoming shape.
    pub fn set_next(&mut self, kind: ShapeKind) {
        self.next = kind;
    }

    /// Id the next spawned piece will carry
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Current RNG state (for restarting with the same continuation)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }

    /// Whether the upcoming shape's spawn cells hold a foreign block.
    ///
    /// Blocks of the currently active piece do not count.
    pub fn is_blocked(&self, field: &Playfield) -> bool {
        spawn_blocked(field.grid(), self.next, field.active())
    }

    /// Spawn the upcoming shape into `field`.
    ///
    /// On success the piece becomes active and a new upcoming shape is drawn.
    /// On a blocked spawn the field is left as is.
    pub fn spawn(&mut self, field: &mut Playfield, score: u32) -> Result<Piece, GameError> {
        if self.is_blocked(field) {
            return Err(GameError::SpawnBlocked { final_score: score });
        }

        let piece = Piece::spawn(self.next_id, self.next);
        field.activate(piece);

        // Id 0 is left to blocks that never belonged to a spawned piece.
        self.next_id = self.next_id.checked_add(1).unwrap_or(1);
        self.next = self.rng.next_shape();
        Ok(piece)
    }

    /// Spawn a specific shape, bypassing the RNG (hosts and tests).
    pub fn spawn_kind(
        &mut self,
        field: &mut Playfield,
        kind: ShapeKind,
        score: u32,
    ) -> Result<Piece, GameError> {
        self.set_next(kind);
        self.spawn(field, score)
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Whether any spawn cell of `kind` is occupied by a block not belonging to `active`.
pub fn spawn_blocked(grid: &Grid, kind: ShapeKind, active: Option<&Piece>) -> bool {
    spawn_cells(kind).iter().any(|&pos| match grid.probe(pos) {
        Probe::Free => false,
        Probe::Occupied(block) => !active.is_some_and(|p| p.owns(&block)),
        Probe::OutOfBounds => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Block;
    use crate::types::{Pos, ShiftDirection};

    fn foreign() -> Block {
        Block {
            piece_id: 999,
            index: 0,
            kind: ShapeKind::I,
        }
    }

    #[test]
    fn test_spawn_advances_preview_and_id() {
        let mut spawner = Spawner::new(42);
        let mut field = Playfield::new();
        let expected = spawner.peek();

        let piece = spawner.spawn(&mut field, 0).unwrap();
        assert_eq!(piece.kind(), expected);
        assert_eq!(piece.id(), 1);
        assert_eq!(spawner.next_id(), 2);
        assert_eq!(field.active(), Some(&piece));
    }

    #[test]
    fn test_id_wraps_past_zero() {
        let mut spawner = Spawner::new(7);
        spawner.next_id = u32::MAX;
        let mut field = Playfield::new();

        let piece = spawner.spawn_kind(&mut field, ShapeKind::I, 0).unwrap();
        assert_eq!(piece.id(), u32::MAX);
        assert_eq!(spawner.next_id(), 1);

        // A locked block with id 0 is foreign to the next piece.
        field.discard_active();
        field.grid_mut().place(foreign_with_id(0), 4, 1).unwrap();
        let next = Piece::spawn(spawner.next_id(), ShapeKind::O);
        assert!(spawn_blocked(field.grid(), ShapeKind::O, Some(&next)));
    }

    fn foreign_with_id(piece_id: u32) -> Block {
        Block {
            piece_id,
            ..foreign()
        }
    }

    #[test]
    fn test_o_spawns_on_empty_grid() {
        let mut spawner = Spawner::new(1);
        let mut field = Playfield::new();
        let piece = spawner.spawn_kind(&mut field, ShapeKind::O, 0).unwrap();
        assert_eq!(piece.cells()[0], Pos::new(4, 0));
        assert_eq!(field.grid().occupied_count(), 4);
    }

    #[test]
    fn test_foreign_block_blocks_spawn() {
        let mut spawner = Spawner::new(1);
        let mut field = Playfield::new();
        field.grid_mut().place(foreign(), 4, 0).unwrap();
        let before = field.clone();

        let err = spawner.spawn_kind(&mut field, ShapeKind::O, 300).unwrap_err();
        assert_eq!(err, GameError::SpawnBlocked { final_score: 300 });
        assert_eq!(field, before);
    }

    #[test]
    fn test_active_piece_does_not_block_its_own_area() {
        let mut field = Playfield::new();
        field.activate(Piece::spawn(5, ShapeKind::T));
        // T spawn cells overlap the I spawn row, but they belong to the active piece.
        assert!(!spawn_blocked(field.grid(), ShapeKind::I, field.active()));

        field.lock();
        assert!(spawn_blocked(field.grid(), ShapeKind::I, None));
    }

    #[test]
    fn test_piece_that_fell_away_clears_spawn_area() {
        let mut spawner = Spawner::new(3);
        let mut field = Playfield::new();
        spawner.spawn_kind(&mut field, ShapeKind::I, 0).unwrap();
        field.shift(ShiftDirection::Down);
        field.lock();
        assert!(!spawn_blocked(field.grid(), ShapeKind::I, None));
    }
}

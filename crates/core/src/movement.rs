//! Movement engine - shift and rotate with all-or-nothing collision checks
//!
//! Every move follows the same protocol:
//!
//! 1. Compute the four candidate cells (translation, or rotation about the pivot).
//! 2. Drop candidates that coincide with the piece's own current cells; the
//!    piece may always move through space it already occupies.
//! 3. Probe the rest against the grid. Any off-board or occupied candidate
//!    rejects the whole move.
//! 4. On acceptance, clear the four old cells, update the piece, and write the
//!    four new cells.
//!
//! There is no wall-kick search: a rotation that would leave the board is
//! rejected, not nudged back in bounds.

use crate::grid::{Grid, Probe};
use crate::piece::Piece;
use crate::types::{Move, Pos, RotateDirection, ShiftDirection};

/// Grid plus the active piece: the whole mutable simulation state a move needs.
///
/// While a piece is active the grid mirrors its four cells, so collision
/// queries see it like any other block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Playfield {
    grid: Grid,
    active: Option<Piece>,
}

/// Outcome of a collision check over a set of candidate cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Clear,
    Blocked(Pos),
    OutOfBounds(Pos),
}

/// Outcome of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The piece moved.
    Applied,
    /// A candidate cell holds a foreign block.
    Blocked,
    /// A candidate cell is off the board.
    OutOfBounds,
    /// The move is a no-op for this shape (O rotation).
    Unchanged,
    /// There is no active piece.
    NoPiece,
}

impl MoveOutcome {
    pub fn applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied)
    }
}

impl Playfield {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    /// Install a piece and write its cells into the grid.
    ///
    /// Overwrites whatever sits under the piece; callers run the spawn check
    /// first. Any previously active piece stays in the grid as static blocks.
    pub fn activate(&mut self, piece: Piece) {
        for (i, pos) in piece.cells().iter().enumerate() {
            self.grid.set(*pos, Some(piece.block(i)));
        }
        self.active = Some(piece);
    }

    /// Release the active piece; its blocks become plain grid content.
    pub fn lock(&mut self) -> Option<Piece> {
        self.active.take()
    }

    /// Drop the active piece and erase its cells from the grid.
    pub fn discard_active(&mut self) -> Option<Piece> {
        let piece = self.active.take()?;
        for &pos in piece.cells() {
            self.grid.set(pos, None);
        }
        Some(piece)
    }

    /// Empty the grid and forget the active piece.
    pub fn reset(&mut self) {
        self.grid.clear_all();
        self.active = None;
    }

    /// Attempt a move on the active piece. All-or-nothing.
    pub fn try_move(&mut self, mv: Move) -> MoveOutcome {
        let Some(piece) = self.active else {
            return MoveOutcome::NoPiece;
        };

        let Some(candidates) = candidate_cells(&piece, mv) else {
            return MoveOutcome::Unchanged;
        };

        match check_collision(&self.grid, &piece, &candidates) {
            Collision::Clear => {
                self.commit(piece, candidates);
                MoveOutcome::Applied
            }
            Collision::Blocked(_) => MoveOutcome::Blocked,
            Collision::OutOfBounds(_) => MoveOutcome::OutOfBounds,
        }
    }

    pub fn shift(&mut self, dir: ShiftDirection) -> MoveOutcome {
        self.try_move(Move::Shift(dir))
    }

    pub fn rotate(&mut self, dir: RotateDirection) -> MoveOutcome {
        self.try_move(Move::Rotate(dir))
    }

    /// Whether the active piece could move down one row.
    pub fn can_fall(&self) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let candidates = shift_cells(&piece, ShiftDirection::Down);
        check_collision(&self.grid, &piece, &candidates) == Collision::Clear
    }

    fn commit(&mut self, mut piece: Piece, next: [Pos; 4]) {
        for &pos in piece.cells() {
            self.grid.set(pos, None);
        }
        piece.set_cells(next);
        for (i, &pos) in next.iter().enumerate() {
            self.grid.set(pos, Some(piece.block(i)));
        }
        self.active = Some(piece);
    }
}

/// Candidate cells for `mv`, or `None` when the move is a no-op (O rotation).
pub fn candidate_cells(piece: &Piece, mv: Move) -> Option<[Pos; 4]> {
    match mv {
        Move::Shift(dir) => Some(shift_cells(piece, dir)),
        Move::Rotate(dir) => rotate_cells(piece, dir),
    }
}

/// Translate every cell one step.
pub fn shift_cells(piece: &Piece, dir: ShiftDirection) -> [Pos; 4] {
    let (dx, dy) = dir.delta();
    piece.cells().map(|p| p.offset(dx, dy))
}

/// Rotate every cell 90° about the pivot. `None` for pivotless shapes.
pub fn rotate_cells(piece: &Piece, dir: RotateDirection) -> Option<[Pos; 4]> {
    let origin = piece.pivot()?;
    Some(piece.cells().map(|p| {
        let (dx, dy) = dir.rotate_offset(p.x - origin.x, p.y - origin.y);
        origin.offset(dx, dy)
    }))
}

/// Check candidate cells against the grid, ignoring the piece's own cells.
pub fn check_collision(grid: &Grid, piece: &Piece, candidates: &[Pos; 4]) -> Collision {
    for &pos in candidates.iter().filter(|&&p| !piece.covers(p)) {
        match grid.probe(pos) {
            Probe::Free => {}
            Probe::Occupied(_) => return Collision::Blocked(pos),
            Probe::OutOfBounds => return Collision::OutOfBounds(pos),
        }
    }
    Collision::Clear
}

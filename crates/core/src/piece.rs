//! Piece module - tetromino templates and the active piece
//!
//! A piece is an immutable shape plus four mutable block positions. One of
//! the blocks may be marked as the pivot; rotation offsets are computed
//! relative to it. The O piece has no pivot and never rotates.

use crate::grid::Block;
use crate::types::{BlockColor, Pos, ShapeKind};

/// Offset of a single block relative to the spawn anchor
pub type BlockOffset = (i8, i8);

/// Spawn template: four offsets from the anchor and the pivot block index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeTemplate {
    pub offsets: [BlockOffset; 4],
    pub pivot: Option<usize>,
}

/// Get the spawn template for a shape
///
/// Layouts (pivot in parentheses):
///
/// ```text
/// I  [0](1)[2][3]      L        [3]     J  [0]
///                         [0](1)[2]        [1](2)[3]
///
/// O  [0][1]            S     [2][3]     Z  [0][1]
///    [2][3]               [0](1)              (2)[3]
///
/// T     [3]
///    [0](1)[2]
/// ```
pub fn template(kind: ShapeKind) -> ShapeTemplate {
    match kind {
        ShapeKind::I => ShapeTemplate {
            offsets: [(0, 0), (1, 0), (2, 0), (3, 0)],
            pivot: Some(1),
        },
        ShapeKind::L => ShapeTemplate {
            offsets: [(0, 0), (1, 0), (2, 0), (2, -1)],
            pivot: Some(1),
        },
        ShapeKind::J => ShapeTemplate {
            offsets: [(0, 0), (0, 1), (1, 1), (2, 1)],
            pivot: Some(2),
        },
        ShapeKind::O => ShapeTemplate {
            offsets: [(0, 0), (1, 0), (0, 1), (1, 1)],
            pivot: None,
        },
        ShapeKind::S => ShapeTemplate {
            offsets: [(0, 1), (1, 1), (1, 0), (2, 0)],
            pivot: Some(1),
        },
        ShapeKind::Z => ShapeTemplate {
            offsets: [(0, 0), (1, 0), (1, 1), (2, 1)],
            pivot: Some(2),
        },
        ShapeKind::T => ShapeTemplate {
            offsets: [(0, 1), (1, 1), (2, 1), (1, 0)],
            pivot: Some(1),
        },
    }
}

/// Default spawn anchor (x, y)
pub const SPAWN_ANCHOR: Pos = Pos::new(3, 0);

/// Spawn anchor for a shape.
///
/// L reaches one row above its anchor, so it starts a row lower; O is
/// nudged one column right to sit centred.
pub fn spawn_anchor(kind: ShapeKind) -> Pos {
    match kind {
        ShapeKind::L => SPAWN_ANCHOR.offset(0, 1),
        ShapeKind::O => SPAWN_ANCHOR.offset(1, 0),
        _ => SPAWN_ANCHOR,
    }
}

/// Absolute spawn cells of a shape.
pub fn spawn_cells(kind: ShapeKind) -> [Pos; 4] {
    let anchor = spawn_anchor(kind);
    template(kind).offsets.map(|(dx, dy)| anchor.offset(dx, dy))
}

/// The active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    id: u32,
    kind: ShapeKind,
    cells: [Pos; 4],
    pivot: Option<usize>,
}

impl Piece {
    /// Create a piece of `kind` at its spawn cells
    pub fn spawn(id: u32, kind: ShapeKind) -> Self {
        Self {
            id,
            kind,
            cells: spawn_cells(kind),
            pivot: template(kind).pivot,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> BlockColor {
        self.kind.color()
    }

    pub fn cells(&self) -> &[Pos; 4] {
        &self.cells
    }

    pub fn pivot_index(&self) -> Option<usize> {
        self.pivot
    }

    /// Coordinates of the pivot block, if the shape has one.
    pub fn pivot(&self) -> Option<Pos> {
        self.pivot.map(|i| self.cells[i])
    }

    /// The grid block for cell `index`.
    pub fn block(&self, index: usize) -> Block {
        Block {
            piece_id: self.id,
            index: index as u8,
            kind: self.kind,
        }
    }

    /// Whether `pos` is one of this piece's current cells.
    pub fn covers(&self, pos: Pos) -> bool {
        self.cells.contains(&pos)
    }

    /// Whether a grid block belongs to this piece.
    pub fn owns(&self, block: &Block) -> bool {
        block.piece_id == self.id
    }

    pub(crate) fn set_cells(&mut self, cells: [Pos; 4]) {
        self.cells = cells;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    #[test]
    fn test_spawn_cells_are_distinct_and_in_bounds() {
        for kind in ShapeKind::ALL {
            let cells = spawn_cells(kind);
            for (i, a) in cells.iter().enumerate() {
                assert!(a.in_bounds(), "{:?} cell {:?} off board", kind, a);
                assert!(a.x < BOARD_WIDTH as i8 && a.y < BOARD_HEIGHT as i8);
                for b in &cells[i + 1..] {
                    assert_ne!(a, b, "{:?} has overlapping cells", kind);
                }
            }
        }
    }

    #[test]
    fn test_l_and_o_use_adjusted_anchor() {
        assert_eq!(spawn_anchor(ShapeKind::L), Pos::new(3, 1));
        assert_eq!(spawn_anchor(ShapeKind::O), Pos::new(4, 0));
        assert_eq!(spawn_anchor(ShapeKind::T), Pos::new(3, 0));

        assert_eq!(
            spawn_cells(ShapeKind::L),
            [Pos::new(3, 1), Pos::new(4, 1), Pos::new(5, 1), Pos::new(5, 0)]
        );
        assert_eq!(
            spawn_cells(ShapeKind::O),
            [Pos::new(4, 0), Pos::new(5, 0), Pos::new(4, 1), Pos::new(5, 1)]
        );
    }

    #[test]
    fn test_only_o_lacks_pivot() {
        for kind in ShapeKind::ALL {
            assert_eq!(template(kind).pivot.is_none(), kind == ShapeKind::O);
        }
    }

    #[test]
    fn test_piece_pivot_and_blocks() {
        let piece = Piece::spawn(7, ShapeKind::J);
        assert_eq!(piece.pivot(), Some(Pos::new(4, 1)));
        assert_eq!(
            piece.block(3),
            Block {
                piece_id: 7,
                index: 3,
                kind: ShapeKind::J
            }
        );
        assert!(piece.covers(Pos::new(3, 0)));
        assert!(!piece.covers(Pos::new(4, 0)));
    }
}

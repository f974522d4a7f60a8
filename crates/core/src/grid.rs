//! Grid module - owns the 10x20 cell matrix
//!
//! Each cell is either empty or holds one [`Block`]: the identity of the piece
//! cell occupying it plus its shape tag (for rendering).
//! Uses a flat array, row-major order, for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;

use crate::types::{BlockColor, GameError, Pos, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// One block of a piece, as stored in a grid cell.
///
/// `(piece_id, index)` is unique per block for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub piece_id: u32,
    pub index: u8,
    pub kind: ShapeKind,
}

impl Block {
    pub fn color(&self) -> BlockColor {
        self.kind.color()
    }
}

/// A grid cell: `None` is empty.
pub type Cell = Option<Block>;

/// Result of a collision probe at one coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    Free,
    Occupied(Block),
    OutOfBounds,
}

/// Row indices, ascending. A grid never has more than `BOARD_HEIGHT` rows.
pub type RowIndices = ArrayVec<usize, HEIGHT>;

/// The playfield grid - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    fn checked_index(x: i8, y: i8) -> Result<usize, GameError> {
        Self::index(x, y).ok_or(GameError::OutOfBounds { x, y })
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Whether (x, y) holds a block.
    ///
    /// Fails with [`GameError::OutOfBounds`] off the board; callers doing
    /// collision checks treat that as blocked.
    pub fn is_occupied(&self, x: i8, y: i8) -> Result<bool, GameError> {
        let idx = Self::checked_index(x, y)?;
        Ok(self.cells[idx].is_some())
    }

    /// Collision probe without the error path.
    pub fn probe(&self, pos: Pos) -> Probe {
        match self.get(pos.x, pos.y) {
            None => Probe::OutOfBounds,
            Some(None) => Probe::Free,
            Some(Some(block)) => Probe::Occupied(block),
        }
    }

    /// Write a block into a cell, overwriting whatever was there.
    ///
    /// When relocating a block the caller clears the old cell first.
    pub fn place(&mut self, block: Block, x: i8, y: i8) -> Result<(), GameError> {
        let idx = Self::checked_index(x, y)?;
        self.cells[idx] = Some(block);
        Ok(())
    }

    /// Write a cell the caller has already bounds-checked.
    pub(crate) fn set(&mut self, pos: Pos, cell: Cell) {
        let idx = Self::index(pos.x, pos.y);
        debug_assert!(idx.is_some(), "cell {:?} is off the board", pos);
        if let Some(idx) = idx {
            self.cells[idx] = cell;
        }
    }

    /// Empty a cell
    pub fn clear(&mut self, x: i8, y: i8) -> Result<(), GameError> {
        let idx = Self::checked_index(x, y)?;
        self.cells[idx] = None;
        Ok(())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        let start = y * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Rows where every column is occupied, ascending (top to bottom).
    pub fn full_row_indices(&self) -> RowIndices {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Empty the given rows and drop every surviving row by the number of
    /// cleared rows beneath it. Vacated top rows end up empty.
    ///
    /// `indices` need not be contiguous or sorted; out-of-range and duplicate
    /// entries are ignored. Uses a two-pointer pass, bottom to top.
    pub fn collapse_rows(&mut self, indices: &[usize]) {
        let mut cleared = [false; HEIGHT];
        for &y in indices {
            if y < HEIGHT {
                cleared[y] = true;
            }
        }
        if !cleared.iter().any(|&c| c) {
            return;
        }

        let mut write_y = HEIGHT;
        for read_y in (0..HEIGHT).rev() {
            if cleared[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
        }

        self.cells[..write_y * WIDTH].fill(None);
    }

    /// Where a given block currently sits, if anywhere.
    pub fn find_block(&self, piece_id: u32, index: u8) -> Option<Pos> {
        self.cells.iter().enumerate().find_map(|(i, cell)| match cell {
            Some(b) if b.piece_id == piece_id && b.index == index => {
                Some(Pos::new((i % WIDTH) as i8, (i / WIDTH) as i8))
            }
            _ => None,
        })
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Write shape codes (0 = empty) into a compact grid.
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (row_out, row) in out.iter_mut().zip(self.rows()) {
            for (dst, cell) in row_out.iter_mut().zip(row) {
                *dst = cell.map_or(0, |b| b.kind.code());
            }
        }
    }

    /// Empty every cell
    pub fn clear_all(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

//! Grid tests - cell access, full-row detection and row collapse

use matris::core::{Block, Grid, Probe};
use matris::types::{GameError, Pos, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

fn block(piece_id: u32, index: u8) -> Block {
    Block {
        piece_id,
        index,
        kind: ShapeKind::T,
    }
}

fn fill_row(grid: &mut Grid, y: i8, piece_id: u32) {
    for x in 0..BOARD_WIDTH as i8 {
        grid.place(block(piece_id, x as u8), x, y).unwrap();
    }
}

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), BOARD_WIDTH);
    assert_eq!(grid.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(grid.get(x, y), Some(None), "({}, {}) should be empty", x, y);
            assert_eq!(grid.is_occupied(x, y), Ok(false));
        }
    }
    assert!(grid.full_row_indices().is_empty());
}

#[test]
fn test_is_occupied_off_board() {
    let grid = Grid::new();
    for (x, y) in [(-1, 0), (0, -1), (10, 0), (0, 20)] {
        assert_eq!(grid.is_occupied(x, y), Err(GameError::OutOfBounds { x, y }));
    }
}

#[test]
fn test_probe_reports_block_identity() {
    let mut grid = Grid::new();
    grid.place(block(42, 3), 6, 12).unwrap();

    assert_eq!(grid.probe(Pos::new(6, 12)), Probe::Occupied(block(42, 3)));
    assert_eq!(grid.probe(Pos::new(5, 12)), Probe::Free);
    assert_eq!(grid.probe(Pos::new(-1, 12)), Probe::OutOfBounds);
}

#[test]
fn test_full_rows_ascending() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 19, 1);
    fill_row(&mut grid, 4, 2);
    fill_row(&mut grid, 12, 3);
    // Nearly full row is not reported.
    for x in 0..9 {
        grid.place(block(4, x as u8), x, 7).unwrap();
    }

    assert_eq!(grid.full_row_indices().as_slice(), &[4, 12, 19]);
}

#[test]
fn test_collapse_single_bottom_row() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 19, 1);
    grid.place(block(5, 0), 0, 18).unwrap();
    grid.place(block(5, 1), 9, 17).unwrap();

    let rows = grid.full_row_indices();
    grid.collapse_rows(&rows);

    assert_eq!(grid.get(0, 19), Some(Some(block(5, 0))));
    assert_eq!(grid.get(9, 18), Some(Some(block(5, 1))));
    assert_eq!(grid.occupied_count(), 2);
}

#[test]
fn test_collapse_shifts_by_rows_cleared_below() {
    // Full rows at 10 and 15: row 9 drops 2, rows 11..14 drop 1, rows 16.. stay.
    let mut grid = Grid::new();
    fill_row(&mut grid, 10, 100);
    fill_row(&mut grid, 15, 101);
    grid.place(block(1, 0), 3, 9).unwrap();
    grid.place(block(1, 1), 3, 13).unwrap();
    grid.place(block(1, 2), 3, 18).unwrap();

    let rows = grid.full_row_indices();
    grid.collapse_rows(&rows);

    assert_eq!(grid.find_block(1, 0), Some(Pos::new(3, 11)));
    assert_eq!(grid.find_block(1, 1), Some(Pos::new(3, 14)));
    assert_eq!(grid.find_block(1, 2), Some(Pos::new(3, 18)));
    assert_eq!(grid.occupied_count(), 3);
}

#[test]
fn test_collapse_four_rows_empties_top() {
    let mut grid = Grid::new();
    for y in 16..20 {
        fill_row(&mut grid, y, y as u32);
    }
    grid.place(block(9, 0), 5, 0).unwrap();

    let rows = grid.full_row_indices();
    grid.collapse_rows(&rows);

    assert_eq!(grid.find_block(9, 0), Some(Pos::new(5, 4)));
    for y in 0..4 {
        assert!(grid.rows().nth(y).unwrap().iter().all(|c| c.is_none()));
    }
}

#[test]
fn test_collapse_unsorted_indices() {
    let mut a = Grid::new();
    fill_row(&mut a, 3, 1);
    fill_row(&mut a, 8, 2);
    a.place(block(7, 0), 1, 0).unwrap();
    let mut b = a.clone();

    a.collapse_rows(&[3, 8]);
    b.collapse_rows(&[8, 3, 8]);
    assert_eq!(a, b);
}

#[test]
fn test_no_block_referenced_twice() {
    let mut grid = Grid::new();
    fill_row(&mut grid, 19, 1);
    fill_row(&mut grid, 18, 2);
    grid.place(block(3, 0), 4, 17).unwrap();
    grid.collapse_rows(&[19]);

    let mut seen = std::collections::HashSet::new();
    for cell in grid.cells().iter().flatten() {
        assert!(seen.insert((cell.piece_id, cell.index)), "duplicate {:?}", cell);
    }
    assert_eq!(seen.len(), 11);
}

#[test]
fn test_u8_grid_uses_shape_codes() {
    let mut grid = Grid::new();
    grid.place(
        Block {
            piece_id: 1,
            index: 0,
            kind: ShapeKind::O,
        },
        2,
        5,
    )
    .unwrap();

    let mut out = [[0u8; 10]; 20];
    grid.write_u8_grid(&mut out);
    assert_eq!(out[5][2], ShapeKind::O.code());
    assert_eq!(out.iter().flatten().filter(|&&c| c != 0).count(), 1);
}

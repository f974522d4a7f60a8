use criterion::{black_box, criterion_group, criterion_main, Criterion};
use matris::core::{Block, GameState, Grid, Piece, Playfield, Spawner};
use matris::types::{RotateDirection, ShapeKind, ShiftDirection, FRAME_MS};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::with_seed(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.game_over() {
                state.reset();
                state.start();
            }
            state.tick(black_box(FRAME_MS));
        })
    });
}

fn bench_collapse(c: &mut Criterion) {
    c.bench_function("collapse_4_rows", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            for y in 16..20 {
                for x in 0..10 {
                    let block = Block {
                        piece_id: 1,
                        index: x as u8,
                        kind: ShapeKind::I,
                    };
                    let _ = grid.place(block, x, y);
                }
            }
            let rows = grid.full_row_indices();
            grid.collapse_rows(black_box(&rows));
            grid
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    let mut spawner = Spawner::new(12345);
    let mut field = Playfield::new();

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            let piece = spawner.spawn(&mut field, 0);
            field.discard_active();
            piece
        })
    });
}

fn bench_shift(c: &mut Criterion) {
    let mut field = Playfield::new();
    field.activate(Piece::spawn(1, ShapeKind::T));
    let mut dir = ShiftDirection::Right;

    c.bench_function("shift", |b| {
        b.iter(|| {
            if !field.shift(black_box(dir)).applied() {
                dir = match dir {
                    ShiftDirection::Right => ShiftDirection::Left,
                    _ => ShiftDirection::Right,
                };
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut field = Playfield::new();
    field.activate(Piece::spawn(1, ShapeKind::T));
    field.shift(ShiftDirection::Down);

    c.bench_function("rotate", |b| {
        b.iter(|| field.rotate(black_box(RotateDirection::Cw)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_collapse,
    bench_spawn,
    bench_shift,
    bench_rotate
);
criterion_main!(benches);

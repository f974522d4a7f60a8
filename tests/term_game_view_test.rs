use matris::core::GameState;
use matris::term::{GameView, Viewport};
use matris::types::{Phase, ShapeKind};

fn screen_text(fb: &matris::term::FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::with_seed(1).snapshot();
    let view = GameView::default();

    // 10 cells * 2 columns + border = 22 wide, 20 rows + border = 22 tall.
    // The minimum viewport leaves no centering slack, so the frame sits at (0,0).
    let fb = view.render(&snap, view.min_viewport());

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = GameState::with_seed(1).snapshot();
    snap.board[19][0] = ShapeKind::J.code();

    let view = GameView::default();
    let fb = view.render(&snap, view.min_viewport());

    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_uses_block_colors() {
    let mut gs = GameState::with_seed(1);
    gs.set_next_shape(ShapeKind::I);
    gs.start();
    let snap = gs.snapshot();

    let view = GameView::default();
    let fb = view.render(&snap, view.min_viewport());

    // Active I occupies columns 3..=6 of row 0.
    let cell = fb.get(1 + 3 * 2, 1).unwrap();
    assert_eq!(cell.ch, '█');
    assert_eq!((cell.style.fg.r, cell.style.fg.g, cell.style.fg.b), (0, 255, 255));
    assert!(cell.style.bold);
}

#[test]
fn term_view_draws_side_panel() {
    let mut gs = GameState::with_seed(1);
    gs.start();
    let mut snap = gs.snapshot();
    snap.score = 1234;
    snap.rows_cleared = 10;
    snap.level = 2;

    let view = GameView::default();
    let all = screen_text(&view.render(&snap, Viewport::new(60, 24)));

    for label in ["SCORE", "ROWS", "LEVEL", "NEXT", "SPEED"] {
        assert!(all.contains(label), "missing {}", label);
    }
    assert!(all.contains("1234"));
    assert!(all.contains("800ms"));
}

#[test]
fn term_view_overlays_follow_phase() {
    let view = GameView::default();
    let vp = Viewport::new(60, 24);

    let mut gs = GameState::with_seed(3);
    assert!(screen_text(&view.render(&gs.snapshot(), vp)).contains("PRESS ENTER"));

    gs.start();
    assert!(!screen_text(&view.render(&gs.snapshot(), vp)).contains("PAUSED"));
    gs.pause();
    assert!(screen_text(&view.render(&gs.snapshot(), vp)).contains("PAUSED"));

    let mut snap = gs.snapshot();
    snap.phase = Phase::GameOver;
    snap.paused = false;
    assert!(screen_text(&view.render(&snap, vp)).contains("GAME OVER"));
}

#[test]
fn term_view_survives_tiny_viewport() {
    let snap = GameState::with_seed(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(5, 3));
    assert_eq!(fb.width(), 5);
    assert_eq!(fb.height(), 3);
}

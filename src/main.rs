//! Terminal Matris runner (default binary).
//!
//! Drives the core game loop from a frame loop: crossterm supplies keys, the
//! elapsed time of each frame is fed to `Game::tick`, and a framebuffer
//! renderer redraws whenever the core reports changed cells.
//!
//! Environment:
//! - `MATRIS_CONFIG`: path to a JSON config (`columns`, `rows`, `tickIntervalMs`)
//! - `MATRIS_TICK_MS`: tick interval override
//! - `MATRIS_SEED`: RNG seed (defaults to the clock)
//! - `MATRIS_LOG_PATH`: append every game event as a JSON line

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use matris::core::{Game, GameConfig};
use matris::event_log::EventLog;
use matris::input::{map_key, should_quit, Command};
use matris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use matris::types::{GameEvent, FRAME_MS};

const CONFIG_ENV: &str = "MATRIS_CONFIG";
const SEED_ENV: &str = "MATRIS_SEED";

fn main() -> Result<()> {
    let config = load_config()?;
    let seed = seed_from_env();
    let log = EventLog::from_env()?;

    println!(
        "[Matris] tick {}ms, seed {}{}",
        config.tick_interval_ms,
        seed,
        if log.is_some() { ", event log on" } else { "" }
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, seed, log);

    // Always try to restore terminal state.
    let _ = term.exit();

    let summary = result?;
    match summary.final_score {
        Some(score) => println!("[Matris] Game over, final score {}", score),
        None => println!("[Matris] Quit with score {}", summary.score),
    }
    Ok(())
}

struct Summary {
    score: u32,
    final_score: Option<u32>,
}

fn load_config() -> Result<GameConfig> {
    let base = match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            let path = path.trim();
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path))?;
            GameConfig::from_json_str(&text).with_context(|| format!("parsing config {}", path))?
        }
        _ => GameConfig::default(),
    };
    Ok(base.with_env_overrides())
}

fn seed_from_env() -> u32 {
    std::env::var(SEED_ENV)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
}

fn run(
    term: &mut TerminalRenderer,
    config: GameConfig,
    seed: u32,
    mut log: Option<EventLog<std::io::BufWriter<std::fs::File>>>,
) -> Result<Summary> {
    let mut game = Game::new(config, seed);

    let dirty = Rc::new(Cell::new(true));
    let pending = Rc::new(RefCell::new(Vec::<GameEvent>::new()));
    let final_score = Rc::new(Cell::new(None));
    {
        let dirty = Rc::clone(&dirty);
        game.on_cells_changed(move |_| dirty.set(true));
    }
    {
        let dirty = Rc::clone(&dirty);
        game.on_score_changed(move |_, _, _| dirty.set(true));
    }
    {
        let final_score = Rc::clone(&final_score);
        game.on_game_over(move |score| final_score.set(Some(score)));
    }
    if log.is_some() {
        let pending = Rc::clone(&pending);
        game.on_event(move |e| pending.borrow_mut().push(*e));
    }

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();
    let mut last_shown = *game.snapshot();

    loop {
        if let Some(log) = log.as_mut() {
            let episode = game.state().episode_id();
            for event in pending.borrow_mut().drain(..) {
                log.record(episode, event)?;
            }
        }

        // Lifecycle changes (pause, start on a blocked board) don't always
        // move cells, so compare snapshots as well.
        if dirty.replace(false) || *game.snapshot() != last_shown {
            last_shown = *game.snapshot();
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&last_shown, Viewport::new(w, h), &mut fb);
            term.present(&fb)?;
        }

        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        break;
                    }
                    match map_key(key) {
                        Some(Command::Move(mv)) => {
                            game.request(mv);
                        }
                        Some(Command::Start) => {
                            game.start();
                        }
                        Some(Command::Pause) => {
                            game.toggle_pause();
                        }
                        Some(Command::Reset) => {
                            game.reset();
                            final_score.set(None);
                        }
                        None => {}
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty.set(true);
                }
                _ => {}
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            game.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }

    if let Some(log) = log.as_mut() {
        log.flush()?;
    }

    Ok(Summary {
        score: game.state().score(),
        final_score: final_score.get(),
    })
}

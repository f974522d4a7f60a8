//! Listener-facing game handle
//!
//! [`GameState`] queues [`GameEvent`]s; `Game` owns a state and delivers the
//! queue to registered callbacks after every operation. Several
//! `CellsChanged` events produced by one operation collapse into a single
//! `on_cells_changed` call carrying the final snapshot.

use std::fmt;

use crate::config::GameConfig;
use crate::game_state::GameState;
use crate::snapshot::GameSnapshot;
use crate::types::{GameError, GameEvent, Move, RotateDirection, ShiftDirection};

type CellsListener = Box<dyn FnMut(&GameSnapshot)>;
type ScoreListener = Box<dyn FnMut(u32, u32, u32)>;
type GameOverListener = Box<dyn FnMut(u32)>;
type EventListener = Box<dyn FnMut(&GameEvent)>;

#[derive(Default)]
struct Listeners {
    cells: Vec<CellsListener>,
    score: Vec<ScoreListener>,
    game_over: Vec<GameOverListener>,
    events: Vec<EventListener>,
}

pub struct Game {
    state: GameState,
    listeners: Listeners,
    snapshot: GameSnapshot,
}

impl Game {
    pub fn new(config: GameConfig, seed: u32) -> Self {
        Self::from_state(GameState::new(config, seed))
    }

    pub fn from_state(state: GameState) -> Self {
        let snapshot = state.snapshot();
        Self {
            state,
            listeners: Listeners::default(),
            snapshot,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access to the state. Events it queues are delivered on the
    /// next operation (or [`Game::flush`]).
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Snapshot as of the last dispatch
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Redraw listener: full grid plus active piece after any mutation.
    pub fn on_cells_changed(&mut self, f: impl FnMut(&GameSnapshot) + 'static) {
        self.listeners.cells.push(Box::new(f));
    }

    /// `(score, rows_cleared, level)` after each scoring change.
    pub fn on_score_changed(&mut self, f: impl FnMut(u32, u32, u32) + 'static) {
        self.listeners.score.push(Box::new(f));
    }

    /// Final score when the game ends.
    pub fn on_game_over(&mut self, f: impl FnMut(u32) + 'static) {
        self.listeners.game_over.push(Box::new(f));
    }

    /// Every event, in emission order.
    pub fn on_event(&mut self, f: impl FnMut(&GameEvent) + 'static) {
        self.listeners.events.push(Box::new(f));
    }

    pub fn start(&mut self) -> bool {
        let changed = self.state.start();
        self.flush();
        changed
    }

    pub fn pause(&mut self) -> bool {
        let changed = self.state.pause();
        self.flush();
        changed
    }

    pub fn resume(&mut self) -> bool {
        let changed = self.state.resume();
        self.flush();
        changed
    }

    pub fn toggle_pause(&mut self) -> bool {
        let changed = self.state.toggle_pause();
        self.flush();
        changed
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.flush();
    }

    pub fn request_move(&mut self, dir: ShiftDirection) -> bool {
        let moved = self.state.request_move(dir);
        self.flush();
        moved
    }

    pub fn request_rotate(&mut self, dir: RotateDirection) -> bool {
        let moved = self.state.request_rotate(dir);
        self.flush();
        moved
    }

    pub fn request(&mut self, mv: Move) -> bool {
        let moved = self.state.request(mv).applied();
        self.flush();
        moved
    }

    pub fn request_tagged(&mut self, kind: &str, dir: &str) -> Result<bool, GameError> {
        let moved = self.state.request_tagged(kind, dir)?;
        self.flush();
        Ok(moved)
    }

    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let changed = self.state.tick(elapsed_ms);
        self.flush();
        changed
    }

    /// Deliver queued events to the listeners.
    pub fn flush(&mut self) {
        let mut cells_changed = false;
        let events: Vec<GameEvent> = self.state.drain_events().collect();

        for event in &events {
            for f in &mut self.listeners.events {
                f(event);
            }
            match *event {
                GameEvent::CellsChanged => cells_changed = true,
                GameEvent::ScoreChanged {
                    score,
                    rows_cleared,
                    level,
                } => {
                    for f in &mut self.listeners.score {
                        f(score, rows_cleared, level);
                    }
                }
                GameEvent::LevelUp { .. } => {}
                GameEvent::GameOver { final_score } => {
                    // The final board (locked piece included) is worth a redraw.
                    cells_changed = true;
                    for f in &mut self.listeners.game_over {
                        f(final_score);
                    }
                }
            }
        }

        if events.is_empty() {
            return;
        }
        self.state.snapshot_into(&mut self.snapshot);
        if cells_changed {
            for f in &mut self.listeners.cells {
                f(&self.snapshot);
            }
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::from_state(GameState::default())
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("cells_listeners", &self.listeners.cells.len())
            .field("score_listeners", &self.listeners.score.len())
            .field("game_over_listeners", &self.listeners.game_over.len())
            .field("event_listeners", &self.listeners.events.len())
            .finish()
    }
}

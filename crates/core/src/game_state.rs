//! Game state module - the game loop state machine
//!
//! This module ties together the playfield, spawner, scoring and timers.
//! It handles gravity, player moves, locking, row clears and the game
//! lifecycle.
//!
//! ```text
//! Idle --start--> Spawning --ok--> Falling --tick, moved--> Falling
//!                    ^                |
//!                    |            tick, landed
//!                    |                v
//!                 Clearing <------ Locking
//!
//! Spawning --blocked--> GameOver
//! ```
//!
//! `Spawning`, `Locking` and `Clearing` are passed through within a single
//! call; between calls the state rests in `Idle`, `Falling` or `GameOver`.

use crate::config::GameConfig;
use crate::movement::{MoveOutcome, Playfield};
use crate::scoring::ScoreState;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::spawner::Spawner;
use crate::timer::IntervalTimer;
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    field: Playfield,
    spawner: Spawner,
    score: ScoreState,
    phase: Phase,
    paused: bool,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    gravity: IntervalTimer,
    spawn_check: IntervalTimer,
    /// Pending notifications, drained by the host.
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given config and RNG seed
    pub fn new(config: GameConfig, seed: u32) -> Self {
        Self {
            config,
            field: Playfield::new(),
            spawner: Spawner::new(seed),
            score: ScoreState::new(config.tick_interval_ms),
            phase: Phase::Idle,
            paused: false,
            episode_id: 0,
            gravity: IntervalTimer::new(config.tick_interval_ms),
            spawn_check: IntervalTimer::new(SPAWN_CHECK_MS),
            events: Vec::new(),
        }
    }

    /// Create a new game with the default config
    pub fn with_seed(seed: u32) -> Self {
        Self::new(GameConfig::default(), seed)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn score(&self) -> u32 {
        self.score.score
    }

    /// The score the game ended with, once it has ended.
    pub fn final_score(&self) -> Option<u32> {
        self.game_over().then_some(self.score.score)
    }

    pub fn rows_cleared(&self) -> u32 {
        self.score.rows_cleared
    }

    pub fn level(&self) -> u32 {
        self.score.level
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.score.tick_interval_ms
    }

    pub fn score_state(&self) -> &ScoreState {
        &self.score
    }

    pub fn next_shape(&self) -> ShapeKind {
        self.spawner.peek()
    }

    /// Force the shape of the next spawn.
    pub fn set_next_shape(&mut self, kind: ShapeKind) {
        self.spawner.set_next(kind);
    }

    pub fn playfield(&self) -> &Playfield {
        &self.field
    }

    /// Direct access to the playfield, for hosts and tests that stage positions.
    pub fn playfield_mut(&mut self) -> &mut Playfield {
        &mut self.field
    }

    pub fn gravity_timer(&self) -> &IntervalTimer {
        &self.gravity
    }

    pub fn spawn_check_timer(&self) -> &IntervalTimer {
        &self.spawn_check
    }

    /// Pending events, oldest first
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.field.grid().write_u8_grid(&mut out.board);
        out.active = self.field.active().map(ActiveSnapshot::from);
        out.next = self.spawner.peek();
        out.phase = self.phase;
        out.paused = self.paused;
        out.episode_id = self.episode_id;
        out.score = self.score.score;
        out.rows_cleared = self.score.rows_cleared;
        out.level = self.score.level;
        out.tick_interval_ms = self.score.tick_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Start the game: spawn the first piece and start both timers.
    ///
    /// On a paused game this resumes instead. Returns whether anything changed.
    pub fn start(&mut self) -> bool {
        match self.phase {
            Phase::Idle => {
                self.gravity.restart(self.score.tick_interval_ms);
                self.spawn_check.start();
                self.phase = Phase::Spawning;
                self.advance();
                true
            }
            Phase::GameOver => false,
            _ => self.resume(),
        }
    }

    /// Stop the gravity timer. The spawn check keeps polling.
    pub fn pause(&mut self) -> bool {
        if self.paused || self.phase != Phase::Falling {
            return false;
        }
        self.paused = true;
        self.gravity.stop();
        true
    }

    /// Restart the gravity timer at the current interval.
    pub fn resume(&mut self) -> bool {
        if !self.paused || self.phase == Phase::GameOver {
            return false;
        }
        self.paused = false;
        self.gravity.restart(self.score.tick_interval_ms);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Tear down both timers and reinitialize everything.
    ///
    /// The new game is `Idle`; the RNG continues from its current state.
    pub fn reset(&mut self) {
        let seed = self.spawner.seed();
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::new(self.config, seed);
        self.episode_id = next_episode;
        self.events.push(GameEvent::CellsChanged);
        self.push_score_changed();
    }

    /// Player shift. Returns whether the piece moved.
    pub fn request_move(&mut self, dir: ShiftDirection) -> bool {
        self.request(Move::Shift(dir)).applied()
    }

    /// Player rotation. Returns whether the piece rotated.
    pub fn request_rotate(&mut self, dir: RotateDirection) -> bool {
        self.request(Move::Rotate(dir)).applied()
    }

    /// Player move from a tag pair such as `("shift", "left")`.
    ///
    /// Malformed tags are rejected with [`GameError::InvalidDirection`] and
    /// change nothing.
    pub fn request_tagged(&mut self, kind: &str, dir: &str) -> Result<bool, GameError> {
        let mv = Move::parse(kind, dir)?;
        Ok(self.request(mv).applied())
    }

    /// Apply a player move to the active piece.
    ///
    /// Moves are accepted while paused; only gravity stops.
    pub fn request(&mut self, mv: Move) -> MoveOutcome {
        if self.phase != Phase::Falling {
            return MoveOutcome::NoPiece;
        }
        let outcome = self.field.try_move(mv);
        if outcome.applied() {
            self.events.push(GameEvent::CellsChanged);
        }
        outcome
    }

    /// Host timer entry point. Returns true if the state changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if matches!(self.phase, Phase::Idle | Phase::GameOver) {
            return false;
        }

        let mut changed = false;
        if self.spawn_check.advance(elapsed_ms) {
            changed |= self.spawn_check();
        }
        if self.gravity.advance(elapsed_ms) {
            changed |= self.gravity_step();
        }
        changed
    }

    /// One gravity step: move the active piece down, or lock, clear and respawn.
    pub fn gravity_step(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }

        if self.field.shift(ShiftDirection::Down).applied() {
            self.events.push(GameEvent::CellsChanged);
        } else {
            self.phase = Phase::Locking;
            self.advance();
        }
        true
    }

    /// Poll whether the upcoming shape can still spawn; ends the game if not.
    pub fn spawn_check(&mut self) -> bool {
        if self.phase != Phase::Falling || !self.spawner.is_blocked(&self.field) {
            return false;
        }
        self.field.lock();
        self.finish();
        true
    }

    /// Run transient phases until the loop rests.
    fn advance(&mut self) {
        loop {
            match self.phase {
                Phase::Spawning => match self.spawner.spawn(&mut self.field, self.score.score) {
                    Ok(_) => {
                        self.phase = Phase::Falling;
                        self.events.push(GameEvent::CellsChanged);
                    }
                    Err(_) => self.finish(),
                },
                Phase::Locking => {
                    self.field.lock();
                    self.phase = Phase::Clearing;
                }
                Phase::Clearing => {
                    self.clear_rows();
                    self.phase = Phase::Spawning;
                }
                Phase::Idle | Phase::Falling | Phase::GameOver => break,
            }
        }
    }

    /// Collapse full rows and update score/level. Zero rows is a no-op.
    fn clear_rows(&mut self) {
        let rows = self.field.grid().full_row_indices();
        if rows.is_empty() {
            return;
        }

        self.field.grid_mut().collapse_rows(&rows);
        self.score.apply_clear(rows.len());
        self.push_score_changed();

        if let Some(up) = self.score.modulate_level() {
            if up.sped_up && !self.paused {
                self.gravity.restart(up.tick_interval_ms);
            }
            self.events.push(GameEvent::LevelUp {
                level: up.level,
                tick_interval_ms: up.tick_interval_ms,
            });
        }

        self.events.push(GameEvent::CellsChanged);
    }

    fn finish(&mut self) {
        self.phase = Phase::GameOver;
        self.paused = false;
        self.gravity.stop();
        self.spawn_check.stop();
        self.events.push(GameEvent::GameOver {
            final_score: self.score.score,
        });
    }

    fn push_score_changed(&mut self) {
        self.events.push(GameEvent::ScoreChanged {
            score: self.score.score,
            rows_cleared: self.score.rows_cleared,
            level: self.score.level,
        });
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

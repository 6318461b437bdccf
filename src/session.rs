//! Game session controller
//!
//! Owns the simulation state, the basket, and every timer. The caller drives
//! a millisecond clock through `advance_to`; due timers fire one at a time in
//! chronological order, each seeing the state the previous one left behind.
//!
//! Game events queue up until `take_events` drains them. Callers that never
//! drain only keep the most recent `MAX_PENDING_EVENTS`.

use crate::consts::*;
use crate::highscores::HighScores;
use crate::movement::{Direction, Movement};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, check_game_over, spawn, tick};
use crate::snapshot::Snapshot;
use crate::timer::Interval;

/// A timer firing, in tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    MoveRepeat,
    IdleCheck,
    Spawn,
    SimTick,
}

/// One game session
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    movement: Movement,
    now_ms: u64,
    sim_timer: Option<Interval>,
    spawn_timer: Option<Interval>,
    high_scores: HighScores,
}

impl Session {
    /// A session on the start screen
    pub fn new(seed: u64) -> Self {
        Self::with_high_scores(seed, HighScores::new())
    }

    pub fn with_high_scores(seed: u64, high_scores: HighScores) -> Self {
        Self {
            state: GameState::new(seed),
            movement: Movement::new(),
            now_ms: 0,
            sim_timer: None,
            spawn_timer: None,
            high_scores,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn movement(&self) -> &Movement {
        &self.movement
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn is_started(&self) -> bool {
        self.state.phase != GamePhase::NotStarted
    }

    pub fn is_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    /// Are the simulation and spawn clocks running?
    pub fn clocks_running(&self) -> bool {
        self.sim_timer.is_some() || self.spawn_timer.is_some()
    }

    /// Begin a fresh run from any phase
    pub fn start(&mut self) {
        self.stop();
        self.state.reset(GamePhase::Playing);
        self.movement.reset();
        self.sim_timer = Some(Interval::starting_at(self.now_ms, SIM_TICK_MS));
        self.spawn_timer = Some(Interval::starting_at(self.now_ms, SPAWN_TICK_MS));
        log::info!("Game started at {}ms (seed {})", self.now_ms, self.state.seed);
    }

    /// Reset everything and go back to the start screen
    pub fn restart(&mut self) {
        self.stop();
        self.state.reset(GamePhase::NotStarted);
        self.movement.reset();
        log::info!("Game reset to start screen");
    }

    /// Cancel all timers and input tracking. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.clocks_running() {
            log::debug!("Stopping session clocks at {}ms", self.now_ms);
        }
        self.sim_timer = None;
        self.spawn_timer = None;
        self.movement.release();
        self.state.charged_escapes.clear();
    }

    /// Input only counts while the run is live and its clocks are ticking
    fn accepts_input(&self) -> bool {
        self.state.is_running() && self.clocks_running()
    }

    /// Start holding the left button
    pub fn request_move_left(&mut self) {
        if self.accepts_input() {
            self.movement.press(Direction::Left, self.now_ms);
        }
    }

    /// Start holding the right button
    pub fn request_move_right(&mut self) {
        if self.accepts_input() {
            self.movement.press(Direction::Right, self.now_ms);
        }
    }

    /// Release any held button
    pub fn request_stop_moving(&mut self) {
        self.movement.release();
    }

    /// Single step without holding; the idle watchdog ends the motion
    pub fn nudge(&mut self, direction: Direction) {
        if self.accepts_input() {
            self.movement.nudge(direction, self.now_ms);
        }
    }

    /// Advance the clock by `dt_ms`
    pub fn advance(&mut self, dt_ms: u64) {
        self.advance_to(self.now_ms + dt_ms);
    }

    /// Fire every timer due up to `now_ms`, then move the clock there
    pub fn advance_to(&mut self, now_ms: u64) {
        if now_ms < self.now_ms {
            log::warn!("Clock went backwards ({} < {}), ignoring", now_ms, self.now_ms);
            return;
        }

        let pending = self.state.events.len();
        if pending > MAX_PENDING_EVENTS {
            self.state.events.drain(..pending - MAX_PENDING_EVENTS);
        }

        let mut fired = 0;
        while let Some((due, event)) = self.next_event() {
            if due > now_ms {
                break;
            }
            if fired == MAX_EVENTS_PER_ADVANCE {
                log::warn!("Timer backlog too large, skipping to {}ms", now_ms);
                self.rebase_timers(now_ms);
                break;
            }
            self.now_ms = due;
            self.fire(event);
            fired += 1;
        }
        self.now_ms = now_ms;
    }

    /// Earliest pending timer; ties go to the earlier `TimerEvent` variant
    fn next_event(&self) -> Option<(u64, TimerEvent)> {
        let candidates = [
            (self.movement.repeat_due(), TimerEvent::MoveRepeat),
            (self.movement.idle_due(), TimerEvent::IdleCheck),
            (self.spawn_timer.map(|t| t.next_due()), TimerEvent::Spawn),
            (self.sim_timer.map(|t| t.next_due()), TimerEvent::SimTick),
        ];
        let mut best: Option<(u64, TimerEvent)> = None;
        for (due, event) in candidates {
            let Some(due) = due else { continue };
            if best.is_none_or(|(best_due, _)| due < best_due) {
                best = Some((due, event));
            }
        }
        best
    }

    fn fire(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::MoveRepeat => self.movement.on_repeat(),
            TimerEvent::IdleCheck => self.movement.on_idle_check(self.now_ms),
            TimerEvent::Spawn => {
                if let Some(timer) = self.spawn_timer.as_mut() {
                    timer.fire();
                }
                spawn(&mut self.state);
            }
            TimerEvent::SimTick => {
                if let Some(timer) = self.sim_timer.as_mut() {
                    timer.fire();
                }
                self.on_sim_tick();
            }
        }
    }

    fn on_sim_tick(&mut self) {
        // Basket position is read at the moment of the tick
        let input = TickInput {
            basket_center: self.movement.position,
        };
        let result = tick(&mut self.state, &input);
        if result.lives_lost > 0 {
            self.on_lives_changed();
        }
    }

    /// React to any change in lives
    fn on_lives_changed(&mut self) {
        if check_game_over(&mut self.state) {
            self.stop();
            let rank = self.high_scores.add_score(
                self.state.score,
                self.state.time_ticks,
                self.now_ms as f64,
            );
            if let Some(rank) = rank {
                log::info!("New high score #{}: {}", rank, self.state.score);
            }
        }
    }

    fn rebase_timers(&mut self, now_ms: u64) {
        if self.sim_timer.is_some() {
            self.sim_timer = Some(Interval::starting_at(now_ms, SIM_TICK_MS));
        }
        if self.spawn_timer.is_some() {
            self.spawn_timer = Some(Interval::starting_at(now_ms, SPAWN_TICK_MS));
        }
        self.movement.rearm_repeat(now_ms);
        self.movement.on_idle_check(now_ms);
    }

    /// Drain events accumulated since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, &self.movement)
    }
}

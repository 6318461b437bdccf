//! Basket movement controller
//!
//! Holding a move button steps the basket once immediately, then once per
//! repeat period until released. Every step pushes back a single idle
//! deadline; if it expires with no further step, the basket goes idle.

use serde::{Deserialize, Serialize};

use crate::clamp_basket;
use crate::consts::*;
use crate::timer::{Deadline, Interval};

/// Facing/motion of the basket, as seen by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    #[default]
    Idle,
}

impl Direction {
    /// Signed step for one move request
    fn delta(self) -> f32 {
        match self {
            Direction::Left => -BASKET_STEP,
            Direction::Right => BASKET_STEP,
            Direction::Idle => 0.0,
        }
    }
}

/// Basket position plus input tracking
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    /// Basket center, always within [BASKET_MIN, BASKET_MAX]
    pub position: f32,
    pub is_moving: bool,
    pub direction: Direction,
    /// Button currently held, if any
    held: Option<Direction>,
    repeat: Option<Interval>,
    idle_deadline: Option<Deadline>,
}

impl Default for Movement {
    fn default() -> Self {
        Self {
            position: BASKET_START,
            is_moving: false,
            direction: Direction::Idle,
            held: None,
            repeat: None,
            idle_deadline: None,
        }
    }
}

impl Movement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Center the basket and drop all input tracking
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn held(&self) -> Option<Direction> {
        self.held
    }

    /// Start holding a move button
    pub fn press(&mut self, direction: Direction, now_ms: u64) {
        if direction == Direction::Idle {
            self.release();
            return;
        }
        // Re-pressing restarts the repeat, pressing the other way cancels it
        self.repeat = None;
        self.held = Some(direction);
        self.step(direction, now_ms);
        self.repeat = Some(Interval::starting_at(now_ms, MOVE_REPEAT_MS));
    }

    /// Release any held button and go idle immediately
    pub fn release(&mut self) {
        self.held = None;
        self.repeat = None;
        self.idle_deadline = None;
        self.is_moving = false;
        self.direction = Direction::Idle;
    }

    /// A single move request without holding (e.g. a key tap)
    pub fn nudge(&mut self, direction: Direction, now_ms: u64) {
        if direction == Direction::Idle {
            return;
        }
        if self.held.is_some_and(|held| held != direction) {
            self.held = None;
            self.repeat = None;
        }
        self.step(direction, now_ms);
    }

    fn step(&mut self, direction: Direction, now_ms: u64) {
        self.is_moving = true;
        self.direction = direction;
        self.position = clamp_basket(self.position + direction.delta());
        self.idle_deadline = Some(Deadline::after(now_ms, MOVE_IDLE_MS));
    }

    /// Restart the held button's repeat from `now_ms` without stepping
    pub fn rearm_repeat(&mut self, now_ms: u64) {
        if self.held.is_some() {
            self.repeat = Some(Interval::starting_at(now_ms, MOVE_REPEAT_MS));
        }
    }

    /// When the held button next repeats
    pub fn repeat_due(&self) -> Option<u64> {
        self.repeat.map(|r| r.next_due())
    }

    /// When the idle watchdog next fires
    pub fn idle_due(&self) -> Option<u64> {
        self.idle_deadline.map(|d| d.at())
    }

    /// Fire the repeat timer (no-op if nothing is held)
    pub fn on_repeat(&mut self) {
        let (Some(repeat), Some(direction)) = (self.repeat.as_mut(), self.held) else {
            return;
        };
        let at = repeat.fire();
        self.step(direction, at);
    }

    /// Go idle if no move request arrived before the deadline
    pub fn on_idle_check(&mut self, now_ms: u64) {
        if self.idle_deadline.is_some_and(|d| d.is_expired(now_ms)) {
            self.idle_deadline = None;
            self.is_moving = false;
            self.direction = Direction::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_press_steps_immediately() {
        let mut movement = Movement::new();
        movement.press(Direction::Left, 0);
        assert_eq!(movement.position, 45.0);
        assert!(movement.is_moving);
        assert_eq!(movement.direction, Direction::Left);
        assert_eq!(movement.repeat_due(), Some(MOVE_REPEAT_MS));
        assert_eq!(movement.idle_due(), Some(MOVE_IDLE_MS));
    }

    #[test]
    fn test_repeat_keeps_moving() {
        let mut movement = Movement::new();
        movement.press(Direction::Right, 0);
        movement.on_repeat();
        movement.on_repeat();
        assert_eq!(movement.position, 65.0);
        assert_eq!(movement.repeat_due(), Some(3 * MOVE_REPEAT_MS));
        // Each repeat pushes the idle deadline back
        assert_eq!(movement.idle_due(), Some(2 * MOVE_REPEAT_MS + MOVE_IDLE_MS));
        movement.on_idle_check(MOVE_IDLE_MS);
        assert!(movement.is_moving);
    }

    #[test]
    fn test_opposite_press_cancels_repeat() {
        let mut movement = Movement::new();
        movement.press(Direction::Right, 0);
        movement.press(Direction::Left, 50);
        assert_eq!(movement.held(), Some(Direction::Left));
        assert_eq!(movement.position, 50.0);
        assert_eq!(movement.repeat_due(), Some(50 + MOVE_REPEAT_MS));
        movement.on_repeat();
        assert_eq!(movement.position, 45.0);
    }

    #[test]
    fn test_release_goes_idle() {
        let mut movement = Movement::new();
        movement.press(Direction::Left, 0);
        movement.release();
        assert!(!movement.is_moving);
        assert_eq!(movement.direction, Direction::Idle);
        assert_eq!(movement.repeat_due(), None);
        assert_eq!(movement.idle_due(), None);
        // Position is kept
        assert_eq!(movement.position, 45.0);
    }

    #[test]
    fn test_release_when_idle_is_noop() {
        let mut movement = Movement::new();
        let before = movement.clone();
        movement.release();
        assert_eq!(movement, before);
    }

    #[test]
    fn test_nudge_reverts_after_timeout() {
        let mut movement = Movement::new();
        movement.nudge(Direction::Right, 1000);
        assert!(movement.is_moving);
        assert_eq!(movement.repeat_due(), None);

        movement.on_idle_check(1000 + MOVE_IDLE_MS - 1);
        assert!(movement.is_moving);

        movement.nudge(Direction::Right, 1100);
        movement.on_idle_check(1000 + MOVE_IDLE_MS);
        assert!(movement.is_moving);

        movement.on_idle_check(1100 + MOVE_IDLE_MS);
        assert!(!movement.is_moving);
        assert_eq!(movement.direction, Direction::Idle);
        assert_eq!(movement.position, 60.0);
    }

    #[test]
    fn test_clamped_at_edges() {
        let mut movement = Movement::new();
        movement.press(Direction::Left, 0);
        for _ in 0..20 {
            movement.on_repeat();
        }
        assert_eq!(movement.position, BASKET_MIN);

        movement.press(Direction::Right, 0);
        for _ in 0..40 {
            movement.on_repeat();
        }
        assert_eq!(movement.position, BASKET_MAX);
    }

    #[test]
    fn test_rearm_repeat_does_not_step() {
        let mut movement = Movement::new();
        movement.press(Direction::Right, 0);
        movement.rearm_repeat(5000);
        assert_eq!(movement.position, 55.0);
        assert_eq!(movement.repeat_due(), Some(5000 + MOVE_REPEAT_MS));

        movement.release();
        movement.rearm_repeat(6000);
        assert_eq!(movement.repeat_due(), None);
    }

    #[test]
    fn test_reset_centers() {
        let mut movement = Movement::new();
        movement.press(Direction::Left, 0);
        movement.reset();
        assert_eq!(movement, Movement::new());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Press(bool),
        Nudge(bool),
        Release,
        Repeat,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<bool>().prop_map(Op::Press),
            any::<bool>().prop_map(Op::Nudge),
            Just(Op::Release),
            Just(Op::Repeat),
        ]
    }

    proptest! {
        #[test]
        fn prop_position_stays_in_bounds(ops in prop::collection::vec(op(), 0..300)) {
            let mut movement = Movement::new();
            for (i, op) in ops.into_iter().enumerate() {
                let now = i as u64 * 10;
                let dir = |left: bool| if left { Direction::Left } else { Direction::Right };
                match op {
                    Op::Press(left) => movement.press(dir(left), now),
                    Op::Nudge(left) => movement.nudge(dir(left), now),
                    Op::Release => movement.release(),
                    Op::Repeat => movement.on_repeat(),
                }
                movement.on_idle_check(now);
                prop_assert!(movement.position >= BASKET_MIN);
                prop_assert!(movement.position <= BASKET_MAX);
                prop_assert_eq!(movement.is_moving, movement.direction != Direction::Idle);
            }
        }
    }
}

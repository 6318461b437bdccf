//! Unicorn Catch - a casual arcade catching game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (falling objects, trees, scoring)
//! - `movement`: Basket movement with auto-repeat and idle watchdog
//! - `timer`: Millisecond intervals and deadlines owned by the session
//! - `session`: Start/restart/game-over orchestration on a fixed clock
//! - `snapshot`: Read-only view consumed by the presentation layer
//! - `highscores`: Local leaderboard of finished runs
//! - `autopilot`: Demo steering used by the native binary

pub mod autopilot;
pub mod highscores;
pub mod movement;
pub mod session;
pub mod sim;
pub mod snapshot;
pub mod timer;

pub use highscores::HighScores;
pub use movement::{Direction, Movement};
pub use session::Session;
pub use snapshot::Snapshot;

/// Game configuration constants
///
/// All coordinates are percent-of-viewport: x grows rightward, y grows
/// downward, both nominally in [0, 100].
pub mod consts {
    /// Simulation tick period (ms)
    pub const SIM_TICK_MS: u64 = 50;
    /// Spawn tick period (ms)
    pub const SPAWN_TICK_MS: u64 = 1500;
    /// Auto-repeat period while a move button is held (ms)
    pub const MOVE_REPEAT_MS: u64 = 100;
    /// Idle watchdog timeout after the last move request (ms)
    pub const MOVE_IDLE_MS: u64 = 200;
    /// Upper bound on timer firings handled by one `advance_to` call
    pub const MAX_EVENTS_PER_ADVANCE: usize = 100_000;
    /// Undrained game events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 1024;

    /// Basket (catcher) dimensions
    pub const BASKET_WIDTH: f32 = 18.0;
    pub const BASKET_HEIGHT: f32 = 12.0;
    /// Distance from the bottom of the screen to the basket's feet
    pub const BASKET_BOTTOM: f32 = 12.0;
    /// Basket center limits (half the character width from each edge)
    pub const BASKET_MIN: f32 = 9.0;
    pub const BASKET_MAX: f32 = 91.0;
    pub const BASKET_START: f32 = 50.0;
    /// Distance moved per move request
    pub const BASKET_STEP: f32 = 5.0;

    /// Tree (obstacle) dimensions
    pub const TREE_WIDTH: f32 = 25.0;
    pub const TREE_HEIGHT: f32 = 18.0;

    /// Per-tick speeds
    pub const FALL_SPEED: f32 = 1.5;
    pub const SLIDE_LATERAL_SPEED: f32 = 2.5;
    pub const SLIDE_DESCENT_SPEED: f32 = 1.5;
    pub const ESCAPE_SPEED: f32 = 4.0;
    /// How far below the current y the tree-hit test looks
    pub const LOOKAHEAD: f32 = 1.5;

    /// Spawn height above the tree top
    pub const SPAWN_OFFSET: f32 = 2.0;

    /// Escaping objects are dropped once x leaves (ESCAPE_MIN_X, ESCAPE_MAX_X)
    pub const ESCAPE_MIN_X: f32 = -10.0;
    pub const ESCAPE_MAX_X: f32 = 110.0;
    /// Escapes run away from this x
    pub const SCREEN_CENTER_X: f32 = 50.0;
    /// Bottom of the visible area
    pub const SCREEN_BOTTOM: f32 = 100.0;

    pub const INITIAL_LIVES: u8 = 5;
    /// Processed-escape set is cleared once it grows past this size
    pub const PROCESSED_SET_LIMIT: usize = 100;
}

/// Floor line the basket stands on (y of the basket's bottom edge)
#[inline]
pub fn floor_level() -> f32 {
    consts::SCREEN_BOTTOM - consts::BASKET_BOTTOM
}

/// Clamp a basket center into its allowed range
#[inline]
pub fn clamp_basket(position: f32) -> f32 {
    position.clamp(consts::BASKET_MIN, consts::BASKET_MAX)
}

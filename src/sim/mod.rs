//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick step only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, timer or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod zone;

pub use collision::{ResolveResult, resolve};
pub use spawn::spawn;
pub use state::{FallingObject, GameEvent, GamePhase, GameState, ObjectState, SlidePhase};
pub use tick::{TickInput, advance_object, check_game_over, tick};
pub use zone::{BasketZone, Side, TREES, TreeId, TreeZone, first_tree_hit};

//! Fixed timestep simulation tick
//!
//! Every unicorn advances one step through its state machine, then the
//! resolve pass reads the post-movement positions.

use super::collision::{ResolveResult, resolve};
use super::state::{FallingObject, GameEvent, GamePhase, GameState, ObjectState, SlidePhase};
use super::zone::{BasketZone, TREES, TreeId, first_tree_hit};
use crate::consts::*;
use crate::floor_level;

/// Input for a single tick
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Basket center at the moment of the tick
    pub basket_center: f32,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            basket_center: BASKET_START,
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> ResolveResult {
    if !state.is_running() {
        return ResolveResult::default();
    }

    state.time_ticks += 1;
    let basket = BasketZone::at(input.basket_center);

    for obj in state.objects.iter_mut() {
        if let Some(tree) = advance_object(obj, &basket) {
            state.events.push(GameEvent::Landed { id: obj.id, tree });
        }
    }

    let result = resolve(state, &basket);
    log::trace!(
        "tick {}: {} active, +{} caught, -{} lives",
        state.time_ticks,
        state.objects.len(),
        result.captured,
        result.lives_lost
    );
    result
}

/// Move one unicorn a single step. Returns the tree index if it just landed.
pub fn advance_object(obj: &mut FallingObject, basket: &BasketZone) -> Option<TreeId> {
    match obj.state {
        ObjectState::Escaping => {
            if obj.pos.x < SCREEN_CENTER_X {
                obj.pos.x -= ESCAPE_SPEED;
            } else {
                obj.pos.x += ESCAPE_SPEED;
            }
            None
        }
        ObjectState::Sliding { tree, phase } => {
            slide(obj, tree, phase);
            None
        }
        ObjectState::Falling => {
            if let Some(tree) = first_tree_hit(obj.pos) {
                let zone = &TREES[tree];
                obj.pos.x = zone.clamp_x(obj.pos.x);
                obj.pos.y = zone.top;
                obj.tree = tree;
                obj.state = ObjectState::Sliding {
                    tree,
                    phase: SlidePhase::Lateral,
                };
                log::debug!(
                    "Unicorn {} landed on {:?} tree {}",
                    obj.id,
                    zone.side,
                    zone.number
                );
                return Some(tree);
            }

            if basket.is_below(obj.pos) {
                obj.pos.y = floor_level();
                obj.state = ObjectState::Escaping;
                return None;
            }

            obj.pos.y += FALL_SPEED;
            None
        }
        ObjectState::Captured | ObjectState::Expired => None,
    }
}

/// Follow the tree contour: along the branch, then down the trunk
fn slide(obj: &mut FallingObject, tree: TreeId, phase: SlidePhase) {
    let zone = &TREES[tree];

    if phase == SlidePhase::Lateral && !zone.reached_far_edge(obj.pos.x) {
        obj.pos.x = zone.step_toward_far_edge(obj.pos.x, SLIDE_LATERAL_SPEED);
        return;
    }

    let new_y = obj.pos.y + SLIDE_DESCENT_SPEED;
    if new_y >= zone.bottom() {
        obj.pos.y = zone.bottom();
        obj.state = ObjectState::Falling;
    } else {
        obj.pos.y = new_y;
        obj.state = ObjectState::Sliding {
            tree,
            phase: SlidePhase::Descending,
        };
    }
}

/// End the run if lives are gone. Returns true on the transition.
pub fn check_game_over(state: &mut GameState) -> bool {
    if state.lives == 0 && state.phase == GamePhase::Playing {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!(
            "Game over after {} ticks, score {}",
            state.time_ticks,
            state.score
        );
        return true;
    }
    false
}

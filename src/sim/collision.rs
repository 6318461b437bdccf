//! Capture, escape charging and removal
//!
//! Runs once per tick, after every unicorn has moved, as a single pass over
//! the active set. Lives are only touched after the whole pass.

use super::state::{GameEvent, GameState, ObjectState};
use super::zone::BasketZone;
use crate::consts::*;

/// Summary of one resolve pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveResult {
    /// Unicorns caught this tick
    pub captured: u32,
    /// Escapes charged a life this tick
    pub lives_lost: u32,
    /// Unicorns removed from the active set (caught or gone)
    pub removed: usize,
}

/// Resolve captures, escapes and removals against the basket's current zone
pub fn resolve(state: &mut GameState, basket: &BasketZone) -> ResolveResult {
    let mut result = ResolveResult::default();

    for obj in state.objects.iter_mut() {
        match obj.state {
            ObjectState::Escaping => {
                // Charged once over the unicorn's lifetime
                if state.charged_escapes.insert(obj.id) {
                    result.lives_lost += 1;
                    state.events.push(GameEvent::Escaped { id: obj.id });
                    log::debug!("Unicorn {} escaped at x={}", obj.id, obj.pos.x);
                }
                if obj.pos.x <= ESCAPE_MIN_X || obj.pos.x >= ESCAPE_MAX_X {
                    obj.state = ObjectState::Expired;
                }
            }
            ObjectState::Falling | ObjectState::Sliding { .. } => {
                if basket.contains(obj.pos) {
                    obj.state = ObjectState::Captured;
                    state.score += 1;
                    result.captured += 1;
                    state.events.push(GameEvent::Captured { id: obj.id });
                    log::debug!("Caught unicorn {} (score {})", obj.id, state.score);
                } else if obj.pos.y >= SCREEN_BOTTOM {
                    // Normally unreachable: the below-basket check fires first
                    obj.state = ObjectState::Expired;
                }
            }
            ObjectState::Captured | ObjectState::Expired => {}
        }
    }

    let before = state.objects.len();
    state.objects.retain(|o| !o.state.is_terminal());
    result.removed = before - state.objects.len();

    if result.lives_lost > 0 {
        prune_charged_escapes(state);
        let lost = u8::try_from(result.lives_lost).unwrap_or(u8::MAX);
        state.lives = state.lives.saturating_sub(lost);
        state.events.push(GameEvent::LifeLost { lives: state.lives });
    }

    result
}

/// Keep the charged set bounded without forgetting unicorns still on screen
fn prune_charged_escapes(state: &mut GameState) {
    if state.charged_escapes.len() <= PROCESSED_SET_LIMIT {
        return;
    }
    let objects = &state.objects;
    state
        .charged_escapes
        .retain(|id| objects.iter().any(|o| o.id == *id));
    log::trace!(
        "Pruned charged escapes to {} entries",
        state.charged_escapes.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{FallingObject, GamePhase};
    use glam::Vec2;

    fn playing_state() -> GameState {
        let mut state = GameState::new(3);
        state.phase = GamePhase::Playing;
        state
    }

    fn push_at(state: &mut GameState, pos: Vec2, obj_state: ObjectState) -> u32 {
        let id = state.next_entity_id();
        let mut obj = FallingObject::above_tree(id, 0);
        obj.pos = pos;
        obj.state = obj_state;
        state.objects.push(obj);
        id
    }

    #[test]
    fn test_capture_inside_basket() {
        let mut state = playing_state();
        let id = push_at(&mut state, Vec2::new(45.0, 80.0), ObjectState::Falling);

        let result = resolve(&mut state, &BasketZone::at(50.0));
        assert_eq!(result.captured, 1);
        assert_eq!(result.removed, 1);
        assert_eq!(state.score, 1);
        assert!(state.object(id).is_none());
        assert!(state.events.contains(&GameEvent::Captured { id }));
    }

    #[test]
    fn test_no_capture_outside_basket() {
        let mut state = playing_state();
        push_at(&mut state, Vec2::new(60.0, 80.0), ObjectState::Falling);
        push_at(&mut state, Vec2::new(50.0, 75.0), ObjectState::Falling);

        let result = resolve(&mut state, &BasketZone::at(50.0));
        assert_eq!(result.captured, 0);
        assert_eq!(state.objects.len(), 2);
    }

    #[test]
    fn test_escaping_never_captured() {
        let mut state = playing_state();
        let id = push_at(&mut state, Vec2::new(50.0, 88.0), ObjectState::Escaping);

        let result = resolve(&mut state, &BasketZone::at(50.0));
        assert_eq!(result.captured, 0);
        assert_eq!(result.lives_lost, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, INITIAL_LIVES - 1);
        assert!(state.object(id).is_some());
    }

    #[test]
    fn test_escape_charged_once() {
        let mut state = playing_state();
        push_at(&mut state, Vec2::new(20.0, 88.0), ObjectState::Escaping);

        let basket = BasketZone::at(80.0);
        resolve(&mut state, &basket);
        let second = resolve(&mut state, &basket);
        assert_eq!(second.lives_lost, 0);
        assert_eq!(state.lives, INITIAL_LIVES - 1);
    }

    #[test]
    fn test_escape_removed_past_bounds() {
        let mut state = playing_state();
        push_at(&mut state, Vec2::new(-10.0, 88.0), ObjectState::Escaping);
        push_at(&mut state, Vec2::new(110.0, 88.0), ObjectState::Escaping);
        push_at(&mut state, Vec2::new(-9.0, 88.0), ObjectState::Escaping);

        let result = resolve(&mut state, &BasketZone::at(50.0));
        assert_eq!(result.removed, 2);
        assert_eq!(result.lives_lost, 3);
        assert_eq!(state.objects.len(), 1);
    }

    #[test]
    fn test_off_bottom_removed_silently() {
        let mut state = playing_state();
        push_at(&mut state, Vec2::new(5.0, 100.0), ObjectState::Falling);

        let result = resolve(&mut state, &BasketZone::at(50.0));
        assert_eq!(result.removed, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, INITIAL_LIVES);
    }

    #[test]
    fn test_lives_floor_at_zero() {
        let mut state = playing_state();
        state.lives = 2;
        for _ in 0..4 {
            push_at(&mut state, Vec2::new(20.0, 88.0), ObjectState::Escaping);
        }
        let result = resolve(&mut state, &BasketZone::at(80.0));
        assert_eq!(result.lives_lost, 4);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_prune_keeps_live_escapes() {
        let mut state = playing_state();
        state.lives = u8::MAX;
        for id in 1000..1000 + PROCESSED_SET_LIMIT as u32 {
            state.charged_escapes.insert(id);
        }
        let id = push_at(&mut state, Vec2::new(20.0, 88.0), ObjectState::Escaping);

        resolve(&mut state, &BasketZone::at(80.0));
        assert!(state.charged_escapes.len() <= PROCESSED_SET_LIMIT);
        assert!(state.charged_escapes.contains(&id));

        // Still on screen, must not be charged again
        let again = resolve(&mut state, &BasketZone::at(80.0));
        assert_eq!(again.lives_lost, 0);
    }
}

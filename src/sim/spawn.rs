//! Unicorn spawner
//!
//! One unicorn per spawn tick, above a uniformly chosen tree.

use rand::Rng;

use super::state::{FallingObject, GameEvent, GameState};
use super::zone::TREES;

/// Spawn one unicorn. Returns its ID, or `None` if the game isn't running.
pub fn spawn(state: &mut GameState) -> Option<u32> {
    if !state.is_running() {
        return None;
    }

    let tree = state.rng.random_range(0..TREES.len());
    let id = state.next_entity_id();
    let obj = FallingObject::above_tree(id, tree);
    log::debug!(
        "Spawned unicorn {} above {:?} tree {} at ({}, {})",
        id,
        obj.side(),
        TREES[tree].number,
        obj.pos.x,
        obj.pos.y
    );
    state.objects.push(obj);
    state.events.push(GameEvent::Spawned { id });
    Some(id)
}

//! Game state and core simulation types

use std::collections::HashSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::zone::{Side, TREES, TreeId, TreeZone};
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing moves
    #[default]
    NotStarted,
    /// Active gameplay
    Playing,
    /// Lives ran out
    GameOver,
}

/// Which leg of the tree contour a sliding unicorn is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlidePhase {
    /// Moving along the branch toward the far edge
    Lateral,
    /// Past the far edge, descending to the tree bottom
    Descending,
}

/// Per-unicorn state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectState {
    Falling,
    Sliding { tree: TreeId, phase: SlidePhase },
    /// Landed past the basket, running off-screen
    Escaping,
    /// Inside the basket, removed at the end of the pass
    Captured,
    /// Left the play area without affecting score or lives
    Expired,
}

impl ObjectState {
    /// Captured and Expired unicorns are dropped from the active set
    pub fn is_terminal(&self) -> bool {
        matches!(self, ObjectState::Captured | ObjectState::Expired)
    }
}

/// A falling unicorn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingObject {
    pub id: u32,
    pub pos: Vec2,
    /// Tree it spawned above, or the last tree it landed on
    pub tree: TreeId,
    pub state: ObjectState,
}

impl FallingObject {
    /// A new unicorn just above `tree`, starting to fall
    pub fn above_tree(id: u32, tree: TreeId) -> Self {
        Self {
            id,
            pos: TREES[tree].spawn_point(),
            tree,
            state: ObjectState::Falling,
        }
    }

    pub fn tree_zone(&self) -> &TreeZone {
        &TREES[self.tree]
    }

    pub fn side(&self) -> Side {
        self.tree_zone().side
    }

    /// On a tree (either leg of the contour)
    pub fn on_tree(&self) -> bool {
        matches!(self.state, ObjectState::Sliding { .. })
    }

    pub fn running_away(&self) -> bool {
        self.state == ObjectState::Escaping
    }
}

/// Things the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32 },
    Landed { id: u32, tree: TreeId },
    Captured { id: u32 },
    Escaped { id: u32 },
    LifeLost { lives: u8 },
    GameOver { score: u64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn-point RNG
    pub rng: Pcg32,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Active unicorns, in spawn order
    pub objects: Vec<FallingObject>,
    /// IDs already charged a life while escaping
    pub charged_escapes: HashSet<u32>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a not-yet-started state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            lives: INITIAL_LIVES,
            phase: GamePhase::NotStarted,
            time_ticks: 0,
            objects: Vec::new(),
            charged_escapes: HashSet::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Clear score, lives and all unicorns, keeping the RNG stream
    pub fn reset(&mut self, phase: GamePhase) {
        self.score = 0;
        self.lives = INITIAL_LIVES;
        self.phase = phase;
        self.time_ticks = 0;
        self.objects.clear();
        self.charged_escapes.clear();
        self.events.clear();
        self.next_id = 1;
    }

    /// Is the simulation allowed to advance?
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn object(&self, id: u32) -> Option<&FallingObject> {
        self.objects.iter().find(|o| o.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_not_started() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.score, 0);
        assert!(!state.is_running());
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut state = GameState::new(7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = GameState::new(7);
        let id = state.next_entity_id();
        state.objects.push(FallingObject::above_tree(id, 2));
        state.charged_escapes.insert(id);
        state.score = 12;
        state.lives = 1;

        state.reset(GamePhase::Playing);
        assert!(state.objects.is_empty());
        assert!(state.charged_escapes.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_spawned_object_flags() {
        let obj = FallingObject::above_tree(1, 2);
        assert_eq!(obj.side(), Side::Right);
        assert_eq!(obj.pos, Vec2::new(100.0, 18.0));
        assert!(!obj.on_tree());
        assert!(!obj.running_away());
        assert!(!obj.state.is_terminal());
    }
}

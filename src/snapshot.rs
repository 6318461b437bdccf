//! Read-only view of a session for the presentation layer
//!
//! The renderer picks sprites and mirroring from `basket.is_moving` and
//! `basket.direction`; nothing visual is computed here.

use serde::{Deserialize, Serialize};

use crate::movement::{Direction, Movement};
use crate::sim::{GamePhase, GameState};

/// A unicorn as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketView {
    pub position: f32,
    pub is_moving: bool,
    pub direction: Direction,
}

/// Everything a frame needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub objects: Vec<ObjectView>,
    pub basket: BasketView,
    pub score: u64,
    pub lives: u8,
    pub started: bool,
    pub over: bool,
}

impl Snapshot {
    pub fn capture(state: &GameState, movement: &Movement) -> Self {
        Self {
            objects: state
                .objects
                .iter()
                .map(|o| ObjectView {
                    id: o.id,
                    x: o.pos.x,
                    y: o.pos.y,
                })
                .collect(),
            basket: BasketView {
                position: movement.position,
                is_moving: movement.is_moving,
                direction: movement.direction,
            },
            score: state.score,
            lives: state.lives,
            started: state.phase != GamePhase::NotStarted,
            over: state.phase == GamePhase::GameOver,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

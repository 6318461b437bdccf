//! Static geometry: tree zones and the basket zone
//!
//! A tree is an axis-aligned band hanging off one screen edge:
//! - top: y of the branch a unicorn lands on
//! - bottom: top + TREE_HEIGHT
//! - start_x: the screen edge the tree grows from
//! - end_x: start_x ± TREE_WIDTH, toward the screen center

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::floor_level;

/// Screen side a tree (and its spawn point) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// A fixed tree zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeZone {
    pub side: Side,
    /// 1 = upper tree, 2 = lower tree
    pub number: u8,
    pub top: f32,
    pub start_x: f32,
}

/// All trees, in hit-test order (first match wins)
pub const TREES: [TreeZone; 4] = [
    TreeZone::new(Side::Left, 1, 20.0, 0.0),
    TreeZone::new(Side::Left, 2, 40.0, 0.0),
    TreeZone::new(Side::Right, 1, 20.0, 100.0),
    TreeZone::new(Side::Right, 2, 40.0, 100.0),
];

/// Index into [`TREES`]
pub type TreeId = usize;

impl TreeZone {
    pub const fn new(side: Side, number: u8, top: f32, start_x: f32) -> Self {
        Self {
            side,
            number,
            top,
            start_x,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + TREE_HEIGHT
    }

    /// The far horizontal edge (toward the screen center)
    #[inline]
    pub fn end_x(&self) -> f32 {
        match self.side {
            Side::Left => self.start_x + TREE_WIDTH,
            Side::Right => self.start_x - TREE_WIDTH,
        }
    }

    #[inline]
    pub fn contains_x(&self, x: f32) -> bool {
        match self.side {
            Side::Left => x >= self.start_x && x <= self.end_x(),
            Side::Right => x <= self.start_x && x >= self.end_x(),
        }
    }

    #[inline]
    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.top && y <= self.bottom()
    }

    /// Inclusive on every edge
    pub fn contains(&self, pos: Vec2) -> bool {
        self.contains_x(pos.x) && self.contains_y(pos.y)
    }

    /// Would an object at `pos` land on this tree within the next step?
    pub fn will_hit(&self, pos: Vec2) -> bool {
        self.contains_x(pos.x) && self.contains_y(pos.y + LOOKAHEAD)
    }

    /// Clamp x into the tree's horizontal span
    pub fn clamp_x(&self, x: f32) -> f32 {
        match self.side {
            Side::Left => x.clamp(self.start_x, self.end_x()),
            Side::Right => x.clamp(self.end_x(), self.start_x),
        }
    }

    pub fn reached_far_edge(&self, x: f32) -> bool {
        match self.side {
            Side::Left => x >= self.end_x(),
            Side::Right => x <= self.end_x(),
        }
    }

    /// Step `x` toward the far edge by `speed`, without overshooting
    pub fn step_toward_far_edge(&self, x: f32, speed: f32) -> f32 {
        match self.side {
            Side::Left => (x + speed).min(self.end_x()),
            Side::Right => (x - speed).max(self.end_x()),
        }
    }

    /// Where a unicorn destined for this tree appears
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.start_x, self.top - SPAWN_OFFSET)
    }
}

/// Find the first tree the object would land on
pub fn first_tree_hit(pos: Vec2) -> Option<TreeId> {
    TREES.iter().position(|tree| tree.will_hit(pos))
}

/// Basket bounds, derived from its current center each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasketZone {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl BasketZone {
    pub fn at(center: f32) -> Self {
        let bottom = floor_level();
        Self {
            left: center - BASKET_WIDTH / 2.0,
            right: center + BASKET_WIDTH / 2.0,
            top: bottom - BASKET_HEIGHT,
            bottom,
        }
    }

    /// Inclusive on every edge
    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= self.left && pos.x <= self.right && pos.y >= self.top && pos.y <= self.bottom
    }

    /// Has the object fallen to (or past) the basket's feet?
    pub fn is_below(&self, pos: Vec2) -> bool {
        pos.y >= self.bottom
    }
}

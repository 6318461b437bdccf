//! Demo autopilot
//!
//! Steers the basket under the unicorn closest to the floor, using the same
//! hold/release commands a player would.

use crate::movement::Direction;
use crate::session::Session;
use crate::sim::ObjectState;

/// How close (in x) counts as "under it"
const DEAD_ZONE: f32 = 3.0;

/// Which way the basket should be heading right now
pub fn desired_direction(session: &Session) -> Direction {
    let target = session
        .state()
        .objects
        .iter()
        .filter(|o| !matches!(o.state, ObjectState::Escaping))
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = target else {
        return Direction::Idle;
    };

    let offset = target.pos.x - session.movement().position;
    if offset > DEAD_ZONE {
        Direction::Right
    } else if offset < -DEAD_ZONE {
        Direction::Left
    } else {
        Direction::Idle
    }
}

/// Issue whatever command moves the basket toward the target
pub fn steer(session: &mut Session) {
    let want = desired_direction(session);
    if session.movement().held() == Some(want) {
        return;
    }
    match want {
        Direction::Left => session.request_move_left(),
        Direction::Right => session.request_move_right(),
        Direction::Idle => session.request_stop_moving(),
    }
}

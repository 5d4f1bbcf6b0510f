//! Ball physics
//!
//! Explicit Euler on a unit-less per-tick step, then per-axis boundary
//! reflection with restitution, isotropic friction and the shot impulse.
//! Reflection is tested on the already-integrated position, so a ball moving
//! faster than the court is wide can skip a bounce; the clamp below still keeps
//! it on the canvas.

use glam::Vec2;

use super::state::{Axis, Ball, Court, GameEvent, Rect, Seat};
use crate::settings::Tuning;

/// Step 1: advance position by velocity
#[inline]
pub fn integrate(ball: &mut Ball) {
    ball.pos += ball.vel;
}

/// Reflect one coordinate back into `[min, max]`.
///
/// Returns the new `(pos, vel)` if the coordinate was outside.
#[inline]
pub fn reflect_axis(pos: f32, vel: f32, min: f32, max: f32, restitution: f32) -> Option<(f32, f32)> {
    let mirrored = if pos < min {
        min + (min - pos)
    } else if pos > max {
        max - (pos - max)
    } else {
        return None;
    };
    Some((mirrored.clamp(min, max), -vel * restitution))
}

/// Step 2: bounce off the court edges, each axis independently
pub fn reflect_bounds(ball: &mut Ball, bounds: &Rect, restitution: f32, events: &mut Vec<GameEvent>) {
    if let Some((x, vx)) = reflect_axis(ball.pos.x, ball.vel.x, bounds.min.x, bounds.max.x, restitution) {
        ball.pos.x = x;
        ball.vel.x = vx;
        events.push(GameEvent::Bounce { axis: Axis::X });
    }
    if let Some((y, vy)) = reflect_axis(ball.pos.y, ball.vel.y, bounds.min.y, bounds.max.y, restitution) {
        ball.pos.y = y;
        ball.vel.y = vy;
        events.push(GameEvent::Bounce { axis: Axis::Y });
    }
}

/// Step 3: damp velocity every tick
#[inline]
pub fn apply_friction(ball: &mut Ball, friction: f32) {
    ball.vel *= friction;
}

/// Step 4: the first shooter within reach overwrites the ball velocity
///
/// The impulse is proportional to the offset, so a ball right under the
/// shooter barely moves. There is no cooldown.
pub fn apply_shot(
    ball: &mut Ball,
    shooters: &[(Seat, Vec2)],
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> bool {
    let Some(&(seat, shooter)) = shooters
        .iter()
        .find(|(_, pos)| ball.pos.distance(*pos) < tuning.contact_radius)
    else {
        return false;
    };
    ball.vel = (ball.pos - shooter) * tuning.shot_gain;
    events.push(GameEvent::Shot { seat, vel: ball.vel });
    true
}

/// Run the full physics step once
pub fn physics_step(
    ball: &mut Ball,
    court: &Court,
    tuning: &Tuning,
    shooters: &[(Seat, Vec2)],
    events: &mut Vec<GameEvent>,
) {
    integrate(ball);
    reflect_bounds(ball, &court.ball_bounds(), tuning.restitution, events);
    apply_friction(ball, tuning.friction);
    apply_shot(ball, shooters, tuning, events);
}

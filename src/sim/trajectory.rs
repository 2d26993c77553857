//! Throw preview: forward-simulated bomb path for the aiming overlay
//!
//! Uses the same launch velocity and gravity as a real bomb, in the same
//! update order, so the sampled points lie on the path a thrown bomb flies
//! until its first contact.

use glam::Vec2;

use super::player::Facing;
use crate::consts::*;

/// Horizontal throw speed for a charge ratio in [0, 1]
#[inline]
pub fn throw_strength(charge_ratio: f32) -> f32 {
    crate::lerp(MIN_THROW_STRENGTH, MAX_THROW_STRENGTH, charge_ratio.clamp(0.0, 1.0))
}

/// Initial bomb velocity
pub fn launch_velocity(facing: Facing, charge_ratio: f32) -> Vec2 {
    Vec2::new(facing.sign() * throw_strength(charge_ratio), BOMB_LAUNCH_VY)
}

/// Sample the flight path starting at `origin`
///
/// A point is recorded every `PREVIEW_SAMPLE_EVERY` steps (step 0 included)
/// for at most `PREVIEW_MAX_STEPS` steps; simulation stops early once the
/// point drops below `floor_y`.
pub fn preview(origin: Vec2, facing: Facing, charge_ratio: f32, floor_y: f32) -> Vec<Vec2> {
    let mut points = Vec::with_capacity((PREVIEW_MAX_STEPS / PREVIEW_SAMPLE_EVERY) as usize + 1);
    let mut pos = origin;
    let mut vel = launch_velocity(facing, charge_ratio);

    for step in 0..PREVIEW_MAX_STEPS {
        if step % PREVIEW_SAMPLE_EVERY == 0 {
            points.push(pos);
        }

        vel.y += BOMB_GRAVITY;
        pos += vel;

        if pos.y > floor_y {
            break;
        }
    }

    points
}

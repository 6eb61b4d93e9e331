//! Shot-quality (xG) model
//!
//! Pure function of the shot location: the goal-mouth angle the shooter sees,
//! damped exponentially by radial distance to the goal centre.

use crate::models::Side;

pub const XG_MIN: f32 = 0.01;
pub const XG_MAX: f32 = 0.95;

/// Half the goal width in unit pitch space.
const HALF_GOAL_WIDTH: f32 = 0.11;
/// Forward distance floor for the angle term.
const MIN_DEPTH: f32 = 0.01;
/// Exponential decay per unit radial distance.
const DISTANCE_DECAY: f32 = 3.5;

/// xG for a shot at `(x, y)` on the 0-100 pitch taken by `shooter`.
///
/// The home side shoots at the goal on y = 0; away shots are mirrored first.
pub fn estimate_shot_quality(x: f32, y: f32, shooter: Side) -> f32 {
    let px = x / 100.0;
    let py = shooter.mirror_y(y) / 100.0;
    let lateral = px - 0.5;
    let depth = py;
    let radial = (lateral * lateral + depth * depth).sqrt();
    xg_from_geometry(goal_angle(depth), radial)
}

/// Angle subtended by the goal mouth at a forward distance.
#[inline]
pub fn goal_angle(depth: f32) -> f32 {
    2.0 * HALF_GOAL_WIDTH.atan2(depth.max(MIN_DEPTH))
}

#[inline]
pub fn xg_from_geometry(angle: f32, radial: f32) -> f32 {
    ((angle / std::f32::consts::PI) * (-DISTANCE_DECAY * radial).exp()).clamp(XG_MIN, XG_MAX)
}

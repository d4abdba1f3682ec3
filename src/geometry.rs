// 2D vector helpers shared by the movement model and the sensors
// angles are in degrees, counter-clockwise from +X

use bevy::prelude::*;

/// Normalize `v`, falling back to `fallback` when `v` has no usable length.
///
/// A zero (or non-finite) vector never produces NaN here; callers pass the
/// heading they want to keep.
pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(fallback)
}

/// Rotate `v` counter-clockwise by `degrees`.
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

pub fn scale(v: Vec2, factor: f32) -> Vec2 {
    v * factor
}

/// Limit the length of `v` to `max`. Shorter vectors are returned as-is.
pub fn clamp_magnitude(v: Vec2, max: f32) -> Vec2 {
    if v.length_squared() <= max * max {
        v
    } else {
        v.clamp_length_max(max)
    }
}

/// Angle of `v` from the positive X axis, in `[0, 360)`.
pub fn angle_deg(v: Vec2) -> f32 {
    let angle = v.y.atan2(v.x).to_degrees();
    let wrapped = if angle < 0.0 { angle + 360.0 } else { angle };
    // tiny negative angles round up to 360.0; adding 0.0 turns -0.0 into 0.0
    if wrapped >= 360.0 { 0.0 } else { wrapped + 0.0 }
}

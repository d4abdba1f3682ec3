// Movement model
// discrete intent -> rotated, speed-limited velocity -> wall-aware correction

use bevy::prelude::*;

use crate::characters::config::AgentConfig;
use crate::geometry::{clamp_magnitude, rotate_deg, scale};
use crate::map::collision::CollisionFlags;

/// Held movement input per axis, each in `-1..=1`.
///
/// Repeated presses in one direction saturate instead of stacking up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub x: i32,
    pub y: i32,
}

impl Intent {
    pub fn left(&mut self) {
        self.x = (self.x - 1).clamp(-1, 1);
    }

    pub fn right(&mut self) {
        self.x = (self.x + 1).clamp(-1, 1);
    }

    pub fn up(&mut self) {
        self.y = (self.y + 1).clamp(-1, 1);
    }

    pub fn down(&mut self) {
        self.y = (self.y - 1).clamp(-1, 1);
    }

    pub fn stop(&mut self) {
        *self = Self::default();
    }

    pub fn is_diagonal(&self) -> bool {
        self.x != 0 && self.y != 0
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

/// Velocity for `intent` when facing `rotation_deg`.
///
/// Input space treats +Y as "forward", so holding up walks along the heading.
pub fn compute_velocity(intent: Intent, rotation_deg: f32, config: &AgentConfig) -> Vec2 {
    let mut velocity = intent.as_vec2();

    // diagonal movement should not be faster
    if intent.is_diagonal() {
        velocity = scale(velocity, config.diagonal_scale);
    }

    velocity = scale(velocity, config.base_velocity);
    velocity = rotate_deg(velocity, rotation_deg + config.facing_offset_deg);
    clamp_magnitude(velocity, config.max_speed)
}

/// Zero the velocity components that would push into a reported wall.
///
/// Up is tested against the velocity sign; down, left and right against the
/// heading sign. That mix is how the contact model has always behaved and
/// tests pin it.
pub fn resolve_collisions(velocity: Vec2, heading: Vec2, flags: CollisionFlags) -> Vec2 {
    let mut velocity = velocity;

    if flags.up && velocity.y > 0.0 {
        velocity.y = 0.0;
    }
    if flags.down && heading.y < 0.0 {
        velocity.y = 0.0;
    }
    if flags.left && heading.x < 0.0 {
        velocity.x = 0.0;
    }
    if flags.right && heading.x > 0.0 {
        velocity.x = 0.0;
    }

    velocity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(x: i32, y: i32) -> Intent {
        Intent { x, y }
    }

    #[test]
    fn intent_saturates() {
        let mut held = Intent::default();
        held.right();
        held.right();
        held.up();
        held.up();
        assert_eq!(held, intent(1, 1));
        held.left();
        assert_eq!(held.x, 0);
        held.left();
        held.left();
        assert_eq!(held.x, -1);
        held.stop();
        assert_eq!(held, Intent::default());
    }

    #[test]
    fn forward_follows_heading() {
        let config = AgentConfig::default();
        // heading east: rotation 0
        let v = compute_velocity(intent(0, 1), 0.0, &config);
        assert!(v.abs_diff_eq(Vec2::new(125.0, 0.0), 1e-3));
        // heading north: rotation 90
        let v = compute_velocity(intent(0, 1), 90.0, &config);
        assert!(v.abs_diff_eq(Vec2::new(0.0, 125.0), 1e-3));
    }

    #[test]
    fn idle_intent_is_zero_velocity() {
        let config = AgentConfig::default();
        for angle in [0.0, 45.0, 133.0, 270.0] {
            assert_eq!(compute_velocity(Intent::default(), angle, &config), Vec2::ZERO);
        }
    }

    #[test]
    fn diagonal_never_faster_than_single_axis() {
        let config = AgentConfig::default();
        for step in 0..36 {
            let angle = step as f32 * 10.0;
            let straight = compute_velocity(intent(1, 0), angle, &config).length();
            for (x, y) in [(1, 1), (1, -1), (-1, 1), (-1, -1)] {
                let diagonal = compute_velocity(intent(x, y), angle, &config).length();
                assert!(diagonal <= straight + 1e-3);
                assert!(diagonal <= config.max_speed + 1e-3);
            }
        }
    }

    #[test]
    fn opposite_diagonals_have_equal_magnitude() {
        let config = AgentConfig::default();
        let up_right = compute_velocity(intent(1, 1), 37.0, &config).length();
        let down_right = compute_velocity(intent(1, -1), 37.0, &config).length();
        assert!((up_right - down_right).abs() < 1e-3);
    }

    #[test]
    fn clamp_holds_for_fast_configs() {
        let config = AgentConfig {
            base_velocity: 1000.0,
            ..default()
        };
        for step in 0..24 {
            let v = compute_velocity(intent(1, 0), step as f32 * 15.0, &config);
            assert!(v.length() <= config.max_speed + 1e-3);
        }
    }

    #[test]
    fn right_contact_blocks_x_only() {
        let flags = CollisionFlags {
            right: true,
            ..default()
        };
        let v = resolve_collisions(Vec2::new(80.0, 30.0), Vec2::X, flags);
        assert_eq!(v, Vec2::new(0.0, 30.0));
    }

    #[test]
    fn up_contact_checks_velocity_sign() {
        let flags = CollisionFlags {
            up: true,
            ..default()
        };
        // heading points down but we still move up: blocked
        let v = resolve_collisions(Vec2::new(0.0, 50.0), Vec2::NEG_Y, flags);
        assert_eq!(v.y, 0.0);
        // moving away from the wall is allowed
        let v = resolve_collisions(Vec2::new(0.0, -50.0), Vec2::Y, flags);
        assert_eq!(v.y, -50.0);
    }

    #[test]
    fn down_contact_checks_heading_sign_not_velocity() {
        let flags = CollisionFlags {
            down: true,
            ..default()
        };
        // backing into the floor while facing up is not blocked
        let v = resolve_collisions(Vec2::new(0.0, -50.0), Vec2::Y, flags);
        assert_eq!(v.y, -50.0);
        // facing the floor blocks y even when moving away from it
        let v = resolve_collisions(Vec2::new(0.0, 50.0), Vec2::NEG_Y, flags);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn left_contact_checks_heading_sign() {
        let flags = CollisionFlags {
            left: true,
            ..default()
        };
        let v = resolve_collisions(Vec2::new(-40.0, 10.0), Vec2::X, flags);
        assert_eq!(v, Vec2::new(-40.0, 10.0));
        let v = resolve_collisions(Vec2::new(-40.0, 10.0), Vec2::NEG_X, flags);
        assert_eq!(v, Vec2::new(0.0, 10.0));
    }
}

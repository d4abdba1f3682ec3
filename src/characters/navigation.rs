// Navigation seam
// a navigator runs first in every frame and steers the agent through MovementInput

use bevy::prelude::*;

use crate::characters::player::PlayerState;

/// Commands a controller (keyboard handler, AI) can issue to an agent.
pub trait MovementInput {
    fn move_left(&mut self);
    fn move_right(&mut self);
    fn move_up(&mut self);
    fn move_down(&mut self);
    fn stop(&mut self);
    /// Copied and normalized; a zero vector keeps the previous target heading.
    fn set_heading(&mut self, heading: Vec2);
    /// Face a world point, measured from the agent's visual origin.
    fn face_point(&mut self, target: Vec2);
}

/// Per-frame steering hook, called synchronously at the start of each update.
///
/// The agent is fully built before the first call, and sensors hold the
/// previous frame's readings.
pub trait Navigator: Send + Sync {
    fn step(&mut self, agent: &mut PlayerState);

    /// Where this navigator is heading, if it has a destination.
    fn goal(&self) -> Option<Vec2> {
        None
    }

    /// True once the destination has been reached.
    fn arrived(&self) -> bool {
        false
    }
}

/// Navigator that never issues commands; input comes from elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl Navigator for Idle {
    fn step(&mut self, _agent: &mut PlayerState) {}
}

/// Walks toward a fixed goal, sidestepping when the forward probes report a wall.
#[derive(Debug, Clone)]
pub struct GoalSeeker {
    goal: Vec2,
    arrival_radius: f32,
    arrived: bool,
}

// probes within this angle of the heading count as "ahead"
const FORWARD_CONE_DEG: f32 = 45.0;

impl GoalSeeker {
    pub fn new(goal: Vec2, arrival_radius: f32) -> Self {
        Self {
            goal,
            arrival_radius,
            arrived: false,
        }
    }
}

impl Navigator for GoalSeeker {
    fn step(&mut self, agent: &mut PlayerState) {
        // intent is rebuilt every frame, like a held key
        agent.stop();

        let distance = agent.visual_origin().distance(self.goal);
        if distance <= self.arrival_radius {
            if !self.arrived {
                info!("agent reached goal {} ({distance:.1} away)", self.goal);
                self.arrived = true;
            }
            return;
        }
        self.arrived = false;

        agent.face_point(self.goal);

        let sensor = agent.wall_sensor();
        let mut ahead_blocked = false;
        let mut left_hits = 0;
        let mut right_hits = 0;
        for (offset, hit) in sensor.offsets_deg().iter().zip(sensor.collisions()) {
            if !hit {
                continue;
            }
            if offset.abs() < FORWARD_CONE_DEG {
                ahead_blocked = true;
            }
            // positive offsets sit counter-clockwise of the heading, on the left
            if *offset > 0.0 {
                left_hits += 1;
            } else if *offset < 0.0 {
                right_hits += 1;
            }
        }

        if !ahead_blocked {
            agent.move_up();
            return;
        }

        debug!("wall ahead, sidestepping (left {left_hits}, right {right_hits})");
        // input +x maps to the right of the heading
        if left_hits > right_hits {
            agent.move_right();
        } else {
            agent.move_left();
        }
    }

    fn goal(&self) -> Option<Vec2> {
        Some(self.goal)
    }

    fn arrived(&self) -> bool {
        self.arrived
    }
}

// Adjacent-agent radar: a circle that follows the agent's visual origin

use bevy::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct Radar {
    circle: Circle,
    center: Vec2,
}

impl Radar {
    pub fn new(radius: f32, center: Vec2) -> Self {
        Self {
            circle: Circle::new(radius),
            center,
        }
    }

    pub fn update(&mut self, center: Vec2) {
        self.center = center;
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.circle.radius
    }

    /// The detection region; pair it with [`Radar::center`] for world placement.
    pub fn circle(&self) -> Circle {
        self.circle
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance_squared(point) <= self.circle.radius * self.circle.radius
    }
}

// custom collision system
// the agent's footprint box and the wall-contact flags the world pushes in

use bevy::prelude::*;

/// Axis-aligned footprint of the agent, anchored at its world position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBox {
    position: Vec2,
    size: Vec2,
}

impl CollisionBox {
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            size: Vec2::new(width, height),
        }
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.position, self.position + self.size)
    }
}

/// Which sides of the agent currently touch a wall.
///
/// Set by the world collaborator; the agent reads them each frame but never clears them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionFlags {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

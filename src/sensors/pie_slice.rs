// Field-of-view wedge aligned with the agent's heading

use bevy::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct PieSliceSensor {
    sector: CircularSector,
    half_angle_deg: f32,
    heading: Vec2,
}

impl PieSliceSensor {
    pub fn new(heading: Vec2, radius: f32, half_angle_deg: f32) -> Self {
        Self {
            sector: CircularSector::new(radius, half_angle_deg.to_radians()),
            half_angle_deg,
            heading,
        }
    }

    pub fn update(&mut self, heading: Vec2) {
        self.heading = heading;
    }

    pub fn heading(&self) -> Vec2 {
        self.heading
    }

    /// Wedge shape. Bevy sectors open around +Y, so rotate by
    /// [`PieSliceSensor::rotation`] before placing it in the world.
    pub fn sector(&self) -> CircularSector {
        self.sector
    }

    /// Rotation taking the sector's +Y axis onto the heading.
    pub fn rotation(&self) -> Rot2 {
        Rot2::radians(self.heading.to_angle() - std::f32::consts::FRAC_PI_2)
    }

    pub fn radius(&self) -> f32 {
        self.sector.radius()
    }

    pub fn half_angle_deg(&self) -> f32 {
        self.half_angle_deg
    }

    /// True when `point` lies within the wedge cast from `origin`.
    pub fn contains(&self, origin: Vec2, point: Vec2) -> bool {
        let offset = point - origin;
        let radius = self.radius();
        if offset.length_squared() > radius * radius {
            return false;
        }
        if offset == Vec2::ZERO {
            return true;
        }
        self.heading.angle_to(offset).abs().to_degrees() <= self.half_angle_deg
    }
}

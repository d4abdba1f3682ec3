// Wall sensor: a fan of probes that rotates with the agent's heading
// probe vectors are relative to the agent's visual origin

use bevy::prelude::*;

use crate::error::{AgentError, Result};
use crate::geometry::{rotate_deg, scale};

/// Probe directions relative to heading, evenly spread over the forward half-plane.
pub const DEFAULT_PROBE_OFFSETS_DEG: [f32; 6] = [-90.0, -54.0, -18.0, 18.0, 54.0, 90.0];

#[derive(Debug, Clone)]
pub struct WallSensor {
    base_length: f32,
    offsets_deg: Vec<f32>,
    lengths: Vec<f32>,
    collisions: Vec<bool>,
    probes: Vec<Vec2>,
}

impl WallSensor {
    pub fn new(base_length: f32, offsets_deg: &[f32], heading: Vec2) -> Self {
        let count = offsets_deg.len();
        let mut sensor = Self {
            base_length,
            offsets_deg: offsets_deg.to_vec(),
            lengths: vec![base_length; count],
            collisions: vec![false; count],
            probes: vec![Vec2::ZERO; count],
        };
        sensor.update(heading);
        sensor
    }

    /// Recompute every probe endpoint from `heading`.
    /// Lengths and collision flags carry over from the previous frame.
    pub fn update(&mut self, heading: Vec2) {
        for ((probe, offset), length) in self
            .probes
            .iter_mut()
            .zip(&self.offsets_deg)
            .zip(&self.lengths)
        {
            *probe = scale(rotate_deg(heading, *offset), *length);
        }
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    pub fn base_length(&self) -> f32 {
        self.base_length
    }

    /// Probe endpoint relative to the agent's visual origin.
    pub fn probe(&self, index: usize) -> Result<Vec2> {
        self.check(index)?;
        Ok(self.probes[index])
    }

    /// Unit direction of a probe, independent of its current length.
    pub fn direction(&self, index: usize, heading: Vec2) -> Result<Vec2> {
        self.check(index)?;
        Ok(rotate_deg(heading, self.offsets_deg[index]))
    }

    pub fn probes(&self) -> &[Vec2] {
        &self.probes
    }

    pub fn offsets_deg(&self) -> &[f32] {
        &self.offsets_deg
    }

    /// Takes effect on the next `update`.
    pub fn set_length(&mut self, index: usize, length: f32) -> Result<()> {
        self.check(index)?;
        self.lengths[index] = length;
        Ok(())
    }

    pub fn length(&self, index: usize) -> Result<f32> {
        self.check(index)?;
        Ok(self.lengths[index])
    }

    pub fn lengths(&self) -> &[f32] {
        &self.lengths
    }

    /// Restore every probe to the base length.
    pub fn reset_lengths(&mut self) {
        self.lengths.fill(self.base_length);
    }

    pub fn set_collision(&mut self, index: usize, hit: bool) -> Result<()> {
        self.check(index)?;
        self.collisions[index] = hit;
        Ok(())
    }

    pub fn collision(&self, index: usize) -> Result<bool> {
        self.check(index)?;
        Ok(self.collisions[index])
    }

    pub fn collisions(&self) -> &[bool] {
        &self.collisions
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.probes.len() {
            Ok(())
        } else {
            Err(AgentError::ProbeIndexOutOfRange {
                index,
                count: self.probes.len(),
            })
        }
    }
}

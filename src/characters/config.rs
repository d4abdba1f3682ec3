// characters/config.rs
// tuning for the agent's movement model and sensors
// loaded from agent.ron, falls back to the built-in defaults
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::sensors::DEFAULT_PROBE_OFFSETS_DEG;

// Asset - loadable from .ron,
// TypePath - gives Bevy a unique name for the asset type
#[derive(Asset, TypePath, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Speed applied to a single held direction, world units per second.
    pub base_velocity: f32,
    /// Hard cap on the final velocity magnitude.
    pub max_speed: f32,
    /// Applied to the intent vector when both axes are held.
    pub diagonal_scale: f32,
    /// Sprites face +Y by default; this re-maps input space onto the heading.
    pub facing_offset_deg: f32,
    /// Wall sensor length, radar radius and FOV radius, in sprite widths.
    pub sensor_range_widths: f32,
    pub fov_half_angle_deg: f32,
    pub probe_offsets_deg: Vec<f32>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_velocity: 125.0,
            max_speed: 250.0,
            diagonal_scale: 0.5,
            facing_offset_deg: -90.0,
            sensor_range_widths: 6.0,
            fov_half_angle_deg: 30.0,
            probe_offsets_deg: DEFAULT_PROBE_OFFSETS_DEG.to_vec(),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.base_velocity.is_finite() && self.base_velocity >= 0.0) {
            return Err(AgentError::Config(format!(
                "base_velocity must be >= 0, got {}",
                self.base_velocity
            )));
        }
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(AgentError::Config(format!(
                "max_speed must be > 0, got {}",
                self.max_speed
            )));
        }
        if !(self.sensor_range_widths.is_finite() && self.sensor_range_widths > 0.0) {
            return Err(AgentError::Config(format!(
                "sensor_range_widths must be > 0, got {}",
                self.sensor_range_widths
            )));
        }
        if !(0.0..=180.0).contains(&self.fov_half_angle_deg) {
            return Err(AgentError::Config(format!(
                "fov_half_angle_deg must be within 0..=180, got {}",
                self.fov_half_angle_deg
            )));
        }
        if self.probe_offsets_deg.is_empty() {
            return Err(AgentError::Config("probe_offsets_deg is empty".into()));
        }
        Ok(())
    }

    /// Sensor reach for an agent `width` units wide.
    pub fn sensor_range(&self, width: f32) -> f32 {
        width * self.sensor_range_widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AgentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.probe_offsets_deg.len(), 6);
        assert_eq!(config.sensor_range(32.0), 192.0);
    }

    #[test]
    fn rejects_bad_values() {
        let config = AgentConfig {
            max_speed: 0.0,
            ..default()
        };
        assert!(matches!(config.validate(), Err(AgentError::Config(_))));

        let config = AgentConfig {
            probe_offsets_deg: Vec::new(),
            ..default()
        };
        assert!(matches!(config.validate(), Err(AgentError::Config(_))));

        let config = AgentConfig {
            fov_half_angle_deg: 270.0,
            ..default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn shipped_ron_matches_defaults() {
        let text = include_str!("../assets/agent.ron");
        let config: AgentConfig = ron::from_str(text).unwrap();
        assert_eq!(config, AgentConfig::default());
    }

    #[test]
    fn partial_ron_fills_defaults() {
        let config: AgentConfig = ron::from_str("(max_speed: 300.0)").unwrap();
        assert_eq!(config.max_speed, 300.0);
        assert_eq!(config.base_velocity, 125.0);
    }
}

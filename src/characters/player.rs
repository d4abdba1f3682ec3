// The arena agent: kinematic state, sensors, and the ordered per-frame update

use bevy::prelude::*;

use crate::characters::config::AgentConfig;
use crate::characters::movement::{self, Intent};
use crate::characters::navigation::{MovementInput, Navigator};
use crate::error::{AgentError, Result};
use crate::geometry::{angle_deg, normalize_or};
use crate::map::collision::{CollisionBox, CollisionFlags};
use crate::sensors::{PieSliceSensor, Radar, WallSensor};

/// Everything about the agent except its navigator.
///
/// Navigators receive `&mut PlayerState` each frame; the update pipeline
/// itself lives on [`PlayerEntity`].
#[derive(Debug, Clone)]
pub struct PlayerState {
    config: AgentConfig,

    // world position of the sprite's anchor corner
    position: Vec2,
    size: Vec2,
    // half extents: position + origin is the sprite center
    origin: Vec2,

    // unit vectors
    heading: Vec2,
    next_heading: Vec2,

    velocity: Vec2,
    next_velocity: Vec2,
    intent: Intent,
    rotation_deg: f32,

    collision: CollisionFlags,
    collision_present: bool,

    collision_box: CollisionBox,
    wall_sensor: WallSensor,
    radar: Radar,
    pie_slice: PieSliceSensor,
}

impl PlayerState {
    fn new(spawn: Vec2, width: f32, height: f32, config: AgentConfig) -> Self {
        let size = Vec2::new(width, height);
        let origin = size / 2.0;
        // always spawns facing east
        let heading = Vec2::X;
        let range = config.sensor_range(width);

        Self {
            position: spawn,
            size,
            origin,
            heading,
            next_heading: heading,
            velocity: Vec2::ZERO,
            next_velocity: Vec2::ZERO,
            intent: Intent::default(),
            rotation_deg: angle_deg(heading),
            collision: CollisionFlags::default(),
            collision_present: false,
            collision_box: CollisionBox::new(spawn, width, height),
            wall_sensor: WallSensor::new(range, &config.probe_offsets_deg, heading),
            radar: Radar::new(range, spawn + origin),
            pie_slice: PieSliceSensor::new(heading, range, config.fov_half_angle_deg),
            config,
        }
    }

    // pipeline stages, run in order by PlayerEntity::update

    fn commit_heading(&mut self) {
        self.heading = self.next_heading;
        self.rotation_deg = angle_deg(self.heading);
    }

    fn compute_velocity(&mut self) {
        self.next_velocity = movement::compute_velocity(self.intent, self.rotation_deg, &self.config);
        self.velocity = self.next_velocity;
    }

    fn resolve_collisions(&mut self) {
        if self.collision_present {
            self.velocity = movement::resolve_collisions(self.velocity, self.heading, self.collision);
        }
    }

    fn integrate(&mut self, elapsed: f32) {
        self.position.x += self.velocity.x * elapsed;
        self.position.y += self.velocity.y * elapsed;
    }

    fn refresh_sensors(&mut self) {
        self.collision_box.set_position(self.position);
        self.wall_sensor.update(self.heading);
        self.radar.update(self.visual_origin());
        self.pie_slice.update(self.heading);
    }

    // collision input from the world

    pub fn set_collision_detection(&mut self, flags: CollisionFlags) {
        self.collision = flags;
    }

    pub fn set_collision_notification(&mut self, present: bool) {
        self.collision_present = present;
    }

    pub fn collision_flags(&self) -> CollisionFlags {
        self.collision
    }

    pub fn collision_present(&self) -> bool {
        self.collision_present
    }

    // kinematics

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn rotation_deg(&self) -> f32 {
        self.rotation_deg
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Sprite half extents.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Sprite center in world space; sensors are cast from here.
    pub fn visual_origin(&self) -> Vec2 {
        self.position + self.origin
    }

    pub fn heading(&self) -> Vec2 {
        self.heading
    }

    pub fn next_heading(&self) -> Vec2 {
        self.next_heading
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn intent(&self) -> Intent {
        self.intent
    }

    // sensors

    pub fn collision_box(&self) -> &CollisionBox {
        &self.collision_box
    }

    pub fn wall_sensor(&self) -> &WallSensor {
        &self.wall_sensor
    }

    /// World-space endpoint of probe `index`.
    pub fn wall_sensor_endpoint(&self, index: usize) -> Result<Vec2> {
        Ok(self.wall_sensor.probe(index)? + self.visual_origin())
    }

    pub fn wall_sensor_probes(&self) -> &[Vec2] {
        self.wall_sensor.probes()
    }

    pub fn wall_sensor_lengths(&self) -> &[f32] {
        self.wall_sensor.lengths()
    }

    pub fn set_wall_sensor_length(&mut self, index: usize, length: f32) -> Result<()> {
        self.wall_sensor.set_length(index, length)
    }

    pub fn set_wall_sensor_collision(&mut self, index: usize, hit: bool) -> Result<()> {
        self.wall_sensor.set_collision(index, hit)
    }

    pub fn wall_sensor_collision(&self, index: usize) -> Result<bool> {
        self.wall_sensor.collision(index)
    }

    pub fn reset_wall_sensor_lengths(&mut self) {
        self.wall_sensor.reset_lengths();
    }

    pub fn radar(&self) -> &Radar {
        &self.radar
    }

    pub fn radar_center(&self) -> Vec2 {
        self.radar.center()
    }

    pub fn pie_slice(&self) -> &PieSliceSensor {
        &self.pie_slice
    }
}

impl MovementInput for PlayerState {
    fn move_left(&mut self) {
        self.intent.left();
    }

    fn move_right(&mut self) {
        self.intent.right();
    }

    fn move_up(&mut self) {
        self.intent.up();
    }

    fn move_down(&mut self) {
        self.intent.down();
    }

    fn stop(&mut self) {
        self.intent.stop();
    }

    fn set_heading(&mut self, heading: Vec2) {
        self.next_heading = normalize_or(heading, self.next_heading);
    }

    fn face_point(&mut self, target: Vec2) {
        self.next_heading = normalize_or(target - self.visual_origin(), self.next_heading);
    }
}

/// A controllable agent: its state plus the navigator that steers it.
#[derive(Component, Deref, DerefMut)]
pub struct PlayerEntity {
    #[deref]
    state: PlayerState,
    navigator: Box<dyn Navigator>,
}

impl PlayerEntity {
    pub fn new(
        spawn: Vec2,
        width: f32,
        height: f32,
        config: AgentConfig,
        navigator: impl Navigator + 'static,
    ) -> Result<Self> {
        config.validate()?;
        debug!("spawning agent at {spawn} ({width}x{height})");
        Ok(Self {
            state: PlayerState::new(spawn, width, height, config),
            navigator: Box::new(navigator),
        })
    }

    /// Advance one frame.
    ///
    /// `elapsed` must be finite and >= 0, otherwise the frame is rejected and
    /// nothing changes: a pending collision notification stays set until the
    /// next accepted frame. A zero tick still refreshes every sensor.
    pub fn update(&mut self, elapsed: f32) -> Result<()> {
        if !(elapsed.is_finite() && elapsed >= 0.0) {
            return Err(AgentError::InvalidElapsed(elapsed));
        }

        self.navigator.step(&mut self.state);

        let state = &mut self.state;
        state.commit_heading();
        state.compute_velocity();
        state.resolve_collisions();
        state.integrate(elapsed);
        state.refresh_sensors();
        state.collision_present = false;

        Ok(())
    }

    /// The steering collaborator injected at construction.
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }
}

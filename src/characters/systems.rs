// Bevy systems driving agents once per frame
// order matters: sense -> step -> sync -> draw

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::characters::config::AgentConfig;
use crate::characters::player::PlayerEntity;
use crate::map::arena::Arena;

const BOX_COLOR: Color = Color::srgb(0.2, 0.6, 1.0);
const PROBE_CLEAR: Color = Color::srgb(0.2, 0.8, 0.3);
const PROBE_HIT: Color = Color::srgb(0.9, 0.1, 0.1);
const RADAR_COLOR: Color = Color::srgb(0.6, 0.6, 0.6);
const FOV_COLOR: Color = Color::srgb(1.0, 0.7, 0.0);

/// Agent config loaded from `agent.ron`, resolved once the asset is ready.
#[derive(Resource, Default)]
pub struct AgentSettings {
    handle: Option<Handle<AgentConfig>>,
    active: Option<AgentConfig>,
}

impl AgentSettings {
    /// `None` until the config asset has loaded (or failed and fallen back to defaults).
    pub fn active(&self) -> Option<&AgentConfig> {
        self.active.as_ref()
    }
}

pub fn load_agent_config(mut settings: ResMut<AgentSettings>, asset_server: Res<AssetServer>) {
    settings.handle = Some(asset_server.load("agent.ron"));
}

pub fn resolve_agent_config(
    mut settings: ResMut<AgentSettings>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<AgentConfig>>,
) {
    if settings.active.is_some() {
        return;
    }
    let Some(handle) = settings.handle.clone() else {
        return;
    };

    if let Some(config) = configs.get(&handle) {
        match config.validate() {
            Ok(()) => {
                info!("agent config loaded");
                settings.active = Some(config.clone());
            }
            Err(err) => {
                warn!("{err}, falling back to defaults");
                settings.active = Some(AgentConfig::default());
            }
        }
    } else if matches!(asset_server.load_state(handle.id()), LoadState::Failed(_)) {
        warn!("agent.ron failed to load, falling back to defaults");
        settings.active = Some(AgentConfig::default());
    }
}

/// World collaborator: push wall contacts and probe readings before the update.
pub fn sense_arena(arena: Option<Res<Arena>>, mut agents: Query<(Entity, &mut PlayerEntity)>) {
    let Some(arena) = arena else {
        return;
    };
    for (entity, mut agent) in agents.iter_mut() {
        if let Err(err) = arena.sense(&mut agent) {
            warn!("sensing failed for {entity}: {err}");
        }
    }
}

pub fn step_agents(time: Res<Time>, mut agents: Query<(Entity, &mut PlayerEntity)>) {
    let elapsed = time.delta_secs();
    for (entity, mut agent) in agents.iter_mut() {
        if let Err(err) = agent.update(elapsed) {
            warn!("skipped frame for {entity}: {err}");
        }
    }
}

/// Move the sprite to the agent's center and turn it to face the heading.
pub fn sync_transforms(mut agents: Query<(&PlayerEntity, &mut Transform)>) {
    for (agent, mut transform) in agents.iter_mut() {
        let center = agent.visual_origin();
        transform.translation.x = center.x;
        transform.translation.y = center.y;
        let facing = agent.rotation_deg() + agent.config().facing_offset_deg;
        transform.rotation = Quat::from_rotation_z(facing.to_radians());
    }
}

pub fn draw_sensors(mut gizmos: Gizmos, agents: Query<&PlayerEntity>) {
    for agent in agents.iter() {
        let rect = agent.collision_box().rect();
        gizmos.rect_2d(Isometry2d::from_translation(rect.center()), rect.size(), BOX_COLOR);

        let origin = agent.visual_origin();
        for (probe, hit) in agent.wall_sensor_probes().iter().zip(agent.wall_sensor().collisions()) {
            let color = if *hit { PROBE_HIT } else { PROBE_CLEAR };
            gizmos.line_2d(origin, origin + *probe, color);
        }

        let radar = agent.radar();
        gizmos.circle_2d(Isometry2d::from_translation(radar.center()), radar.radius(), RADAR_COLOR);

        let fov = agent.pie_slice();
        let half_angle = fov.half_angle_deg().to_radians();
        gizmos.arc_2d(
            Isometry2d::new(origin, fov.rotation()),
            half_angle * 2.0,
            fov.radius(),
            FOV_COLOR,
        );
        for edge in [half_angle, -half_angle] {
            let direction = Rot2::radians(edge) * fov.heading();
            gizmos.line_2d(origin, origin + direction * fov.radius(), FOV_COLOR);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::AgentSimPlugin;
    use crate::characters::navigation::{Idle, MovementInput};
    use std::time::Duration;

    fn app_with_arena() -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.insert_resource(Arena::walled(10, 10, 32.0, Vec2::new(240.0, 240.0)).unwrap());
        app.add_plugins(AgentSimPlugin);
        app
    }

    #[test]
    fn one_frame_senses_steps_and_syncs() {
        let mut app = app_with_arena();
        let mut agent =
            PlayerEntity::new(Vec2::new(32.0, 32.0), 32.0, 32.0, AgentConfig::default(), Idle)
                .unwrap();
        agent.move_up();
        let entity = app.world_mut().spawn((agent, Transform::default())).id();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(100));
        app.update();

        let agent = app.world().get::<PlayerEntity>(entity).unwrap();
        assert!(agent.collision_flags().left);
        assert!(agent.collision_flags().down);
        assert!(!agent.collision_present());
        assert!(agent.wall_sensor_collision(0).unwrap());
        assert!((agent.position().x - 44.5).abs() < 1e-3);

        let transform = app.world().get::<Transform>(entity).unwrap();
        assert!((transform.translation.x - 60.5).abs() < 1e-3);
        assert!((transform.translation.y - 48.0).abs() < 1e-3);
    }

    #[test]
    fn runs_without_an_arena() {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.add_plugins(AgentSimPlugin);
        let agent = PlayerEntity::new(Vec2::ZERO, 32.0, 32.0, AgentConfig::default(), Idle).unwrap();
        let entity = app.world_mut().spawn((agent, Transform::default())).id();
        app.update();
        let agent = app.world().get::<PlayerEntity>(entity).unwrap();
        assert_eq!(agent.position(), Vec2::ZERO);
        assert_eq!(agent.radar_center(), Vec2::new(16.0, 16.0));
    }
}

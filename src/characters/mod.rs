pub mod config;
pub mod movement;
pub mod navigation;
pub mod player;
pub mod systems;

use bevy::prelude::*;
use bevy_common_assets::ron::RonAssetPlugin;
use config::AgentConfig;

/// Per-frame agent simulation only: no assets, no rendering.
/// Needs a `Time` resource; an `Arena` resource is optional.
pub struct AgentSimPlugin;

impl Plugin for AgentSimPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                systems::sense_arena,
                systems::step_agents,
                systems::sync_transforms,
            )
                .chain()
                .in_set(AgentSystems::Simulate),
        );
    }
}

/// Full plugin for windowed apps: RON config, simulation, and sensor gizmos.
pub struct AgentPlugin;

impl Plugin for AgentPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RonAssetPlugin::<AgentConfig>::new(&["agent.ron"]))
            .add_plugins(AgentSimPlugin)
            .init_resource::<systems::AgentSettings>()
            .add_systems(Startup, systems::load_agent_config)
            .add_systems(Update, systems::resolve_agent_config)
            .add_systems(
                Update,
                systems::draw_sensors.after(AgentSystems::Simulate),
            );
    }
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum AgentSystems {
    Simulate,
}

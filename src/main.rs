// demo: one goal-seeking agent in a walled arena with random pillars

use bevy::{
    prelude::*,
    window::{Window, WindowPlugin, WindowResolution},
};

use rusty_scout::{AgentPlugin, Arena, GoalSeeker, Navigator, PlayerEntity};
use rusty_scout::characters::systems::AgentSettings;

const TILE_SIZE: f32 = 32.0;
const ARENA_TILES: UVec2 = UVec2::new(30, 20);
const PILLARS: usize = 60;
const AGENT_SIZE: f32 = 32.0;
const ARRIVAL_RADIUS: f32 = 8.0;

const AGENT_COLOR: Color = Color::srgb(0.2, 0.4, 0.9);
const ARRIVED_COLOR: Color = Color::srgb(0.95, 0.6, 0.1);

fn main() {
    let arena = match build_arena() {
        Ok(arena) => arena,
        Err(err) => {
            eprintln!("could not build arena: {err}");
            return;
        }
    };
    let map_size = arena.pixel_size();

    App::new()
        // background color: WHITE
        .insert_resource(ClearColor(Color::WHITE))
        .add_plugins(
            DefaultPlugins
                .set(AssetPlugin {
                    // assets are in 'src/assets'
                    file_path: "src/assets".into(),
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        resolution: WindowResolution::new(map_size.x as u32, map_size.y as u32),
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(arena)
        .add_plugins(AgentPlugin)
        .add_systems(Startup, (setup_camera, spawn_tiles))
        .add_systems(Update, (spawn_agent_once, mark_arrival))
        .run();
}

fn spawn_point() -> Vec2 {
    Vec2::splat(TILE_SIZE * 1.5)
}

fn build_arena() -> rusty_scout::error::Result<Arena> {
    let goal = Vec2::new(
        (ARENA_TILES.x as f32 - 2.5) * TILE_SIZE,
        (ARENA_TILES.y as f32 - 2.5) * TILE_SIZE,
    );
    let mut arena = Arena::walled(ARENA_TILES.x, ARENA_TILES.y, TILE_SIZE, goal)?;
    let agent_center = spawn_point() + AGENT_SIZE / 2.0;
    arena.scatter_pillars(PILLARS, &[spawn_point(), agent_center, goal], &mut rand::rng());
    Ok(arena)
}

// the arena spans 0..map_size, so center the camera on it
fn setup_camera(mut commands: Commands, arena: Res<Arena>) {
    let center = arena.pixel_size() / 2.0;
    commands.spawn((Camera2d, Transform::from_xyz(center.x, center.y, 0.0)));
}

fn spawn_tiles(mut commands: Commands, arena: Res<Arena>) {
    let tile = Vec2::splat(arena.tile_size());
    for center in arena.solid_tiles() {
        commands.spawn((
            Sprite::from_color(Color::srgb(0.25, 0.25, 0.3), tile),
            Transform::from_xyz(center.x, center.y, 0.0),
        ));
    }

    let goal = arena.goal();
    commands.spawn((
        Sprite::from_color(Color::srgb(0.1, 0.7, 0.2), Vec2::splat(12.0)),
        Transform::from_xyz(goal.x, goal.y, 1.0),
    ));
}

// waits for agent.ron before spawning, like the character setup waits for its RON list
fn spawn_agent_once(
    mut commands: Commands,
    settings: Res<AgentSettings>,
    arena: Res<Arena>,
    mut spawned: Local<bool>,
) {
    if *spawned {
        return;
    }
    let Some(config) = settings.active() else {
        return;
    };
    *spawned = true;

    let navigator = GoalSeeker::new(arena.goal(), ARRIVAL_RADIUS);
    match PlayerEntity::new(spawn_point(), AGENT_SIZE, AGENT_SIZE, config.clone(), navigator) {
        Ok(agent) => {
            info!("agent spawned, heading for {}", arena.goal());
            commands.spawn((
                agent,
                Sprite::from_color(AGENT_COLOR, Vec2::splat(AGENT_SIZE)),
                Transform::from_xyz(0.0, 0.0, 2.0),
            ));
        }
        Err(err) => error!("could not spawn agent: {err}"),
    }
}

// recolor the agent while its navigator reports arrival
fn mark_arrival(mut agents: Query<(&PlayerEntity, &mut Sprite)>) {
    for (agent, mut sprite) in &mut agents {
        let color = if agent.navigator().arrived() {
            ARRIVED_COLOR
        } else {
            AGENT_COLOR
        };
        if sprite.color != color {
            sprite.color = color;
        }
    }
}

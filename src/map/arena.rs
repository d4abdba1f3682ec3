// Tile arena
// the world side of the agent contract: owns the goal, reports wall contacts,
// and measures wall sensor probes against solid tiles

use bevy::prelude::*;
use rand::Rng;

use crate::characters::player::PlayerState;
use crate::error::{AgentError, Result};
use crate::map::collision::CollisionFlags;

// how far outside the footprint we look for touching walls
const CONTACT_SKIN: f32 = 1.0;
// keeps corner contacts from flagging two sides at once
const EDGE_INSET: f32 = 1.0;

/// Grid of solid and open tiles. Tile `(0, 0)` starts at the world origin, y up.
/// Anything outside the grid counts as solid.
#[derive(Resource, Debug, Clone)]
pub struct Arena {
    width: u32,
    height: u32,
    tile_size: f32,
    blocked: Vec<bool>,
    goal: Vec2,
}

impl Arena {
    /// Open floor with no walls.
    ///
    /// `tile_size` must be finite and positive, and the grid at least one tile.
    pub fn new(width: u32, height: u32, tile_size: f32, goal: Vec2) -> Result<Self> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(AgentError::Arena(format!(
                "tile_size must be finite and > 0, got {tile_size}"
            )));
        }
        if width == 0 || height == 0 {
            return Err(AgentError::Arena(format!("empty grid {width}x{height}")));
        }
        Ok(Self {
            width,
            height,
            tile_size,
            blocked: vec![false; (width * height) as usize],
            goal,
        })
    }

    /// Open floor fenced in by a one-tile border.
    pub fn walled(width: u32, height: u32, tile_size: f32, goal: Vec2) -> Result<Self> {
        let mut arena = Self::new(width, height, tile_size, goal)?;
        for x in 0..width {
            arena.set_blocked(x, 0, true);
            arena.set_blocked(x, height - 1, true);
        }
        for y in 0..height {
            arena.set_blocked(0, y, true);
            arena.set_blocked(width - 1, y, true);
        }
        Ok(arena)
    }

    /// Block `count` random interior tiles, never the ones containing `keep_clear` points.
    pub fn scatter_pillars(&mut self, count: usize, keep_clear: &[Vec2], rng: &mut impl Rng) {
        if self.width < 3 || self.height < 3 {
            return;
        }
        let reserved: Vec<(i32, i32)> = keep_clear.iter().map(|p| self.tile_of(*p)).collect();
        let mut placed = 0;
        // bounded so a crowded arena cannot spin forever
        for _attempt in 0..count * 20 {
            if placed == count {
                break;
            }
            let x = rng.random_range(1..self.width - 1);
            let y = rng.random_range(1..self.height - 1);
            if reserved.contains(&(x as i32, y as i32)) || self.is_blocked_tile(x as i32, y as i32) {
                continue;
            }
            self.set_blocked(x, y, true);
            placed += 1;
        }
        debug!("scattered {placed} pillars");
    }

    pub fn set_blocked(&mut self, x: u32, y: u32, blocked: bool) {
        if x < self.width && y < self.height {
            let index = (y * self.width + x) as usize;
            self.blocked[index] = blocked;
        }
    }

    pub fn is_blocked_tile(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return true;
        }
        self.blocked[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn is_blocked(&self, point: Vec2) -> bool {
        let (x, y) = self.tile_of(point);
        self.is_blocked_tile(x, y)
    }

    pub fn tile_of(&self, point: Vec2) -> (i32, i32) {
        let tile = (point / self.tile_size).floor();
        (tile.x as i32, tile.y as i32)
    }

    pub fn tile_center(&self, x: u32, y: u32) -> Vec2 {
        (Vec2::new(x as f32, y as f32) + 0.5) * self.tile_size
    }

    /// Centers of every solid tile, row by row.
    pub fn solid_tiles(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(move |(x, y)| self.is_blocked_tile(*x as i32, *y as i32))
            .map(move |(x, y)| self.tile_center(x, y))
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * self.tile_size
    }

    pub fn goal(&self) -> Vec2 {
        self.goal
    }

    /// Which sides of `rect` are touching a solid tile.
    pub fn collision_flags(&self, rect: Rect) -> CollisionFlags {
        let xs = [rect.min.x + EDGE_INSET, rect.center().x, rect.max.x - EDGE_INSET];
        let ys = [rect.min.y + EDGE_INSET, rect.center().y, rect.max.y - EDGE_INSET];

        CollisionFlags {
            up: xs.iter().any(|x| self.is_blocked(Vec2::new(*x, rect.max.y + CONTACT_SKIN))),
            down: xs.iter().any(|x| self.is_blocked(Vec2::new(*x, rect.min.y - CONTACT_SKIN))),
            left: ys.iter().any(|y| self.is_blocked(Vec2::new(rect.min.x - CONTACT_SKIN, *y))),
            right: ys.iter().any(|y| self.is_blocked(Vec2::new(rect.max.x + CONTACT_SKIN, *y))),
        }
    }

    /// Distance along `direction` to the first solid sample, if within `max_length`.
    pub fn march(&self, origin: Vec2, direction: Vec2, max_length: f32) -> Option<f32> {
        let step = self.tile_size * 0.25;
        let mut distance = step;
        while distance <= max_length {
            if self.is_blocked(origin + direction * distance) {
                return Some(distance);
            }
            distance += step;
        }
        None
    }

    /// Push this frame's wall contacts and probe readings into the agent.
    ///
    /// Call before the agent's update. Every probe is reset to its base
    /// length, then blocked probes are shortened to the wall and flagged.
    pub fn sense(&self, agent: &mut PlayerState) -> Result<()> {
        let flags = self.collision_flags(agent.collision_box().rect());
        agent.set_collision_detection(flags);
        agent.set_collision_notification(flags.any());
        agent.reset_wall_sensor_lengths();

        let origin = agent.visual_origin();
        let heading = agent.heading();
        let base = agent.wall_sensor().base_length();
        for index in 0..agent.wall_sensor().len() {
            let direction = agent.wall_sensor().direction(index, heading)?;
            let hit = self.march(origin, direction, base);
            if let Some(distance) = hit {
                agent.set_wall_sensor_length(index, distance)?;
            }
            agent.set_wall_sensor_collision(index, hit.is_some())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::config::AgentConfig;
    use crate::characters::navigation::Idle;
    use crate::characters::player::PlayerEntity;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn arena() -> Arena {
        Arena::walled(10, 10, 32.0, Vec2::new(240.0, 240.0)).unwrap()
    }

    #[test]
    fn outside_is_solid() {
        let arena = Arena::new(4, 4, 32.0, Vec2::ZERO).unwrap();
        assert!(arena.is_blocked(Vec2::new(-1.0, 10.0)));
        assert!(arena.is_blocked(Vec2::new(10.0, 128.0)));
        assert!(!arena.is_blocked(Vec2::new(127.9, 0.0)));
    }

    #[test]
    fn degenerate_grids_are_refused() {
        for tile_size in [0.0, -32.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                Arena::new(4, 4, tile_size, Vec2::ZERO),
                Err(AgentError::Arena(_))
            ));
        }
        assert!(matches!(
            Arena::walled(0, 4, 32.0, Vec2::ZERO),
            Err(AgentError::Arena(_))
        ));
    }

    #[test]
    fn walled_border() {
        let arena = arena();
        assert!(arena.is_blocked_tile(0, 5));
        assert!(arena.is_blocked_tile(9, 9));
        assert!(!arena.is_blocked_tile(1, 1));
        assert_eq!(arena.solid_tiles().count(), 36);
        assert_eq!(arena.pixel_size(), Vec2::splat(320.0));
    }

    #[test]
    fn contact_flags_for_a_corner_spot() {
        let arena = arena();
        let rect = Rect::from_corners(Vec2::new(32.0, 32.0), Vec2::new(64.0, 64.0));
        let flags = arena.collision_flags(rect);
        assert_eq!(
            flags,
            CollisionFlags {
                up: false,
                down: true,
                left: true,
                right: false,
            }
        );

        let rect = Rect::from_corners(Vec2::new(128.0, 128.0), Vec2::new(160.0, 160.0));
        assert!(!arena.collision_flags(rect).any());
    }

    #[test]
    fn march_stops_at_first_wall() {
        let arena = arena();
        assert_eq!(arena.march(Vec2::new(48.0, 48.0), Vec2::NEG_Y, 192.0), Some(24.0));
        assert_eq!(arena.march(Vec2::new(48.0, 48.0), Vec2::Y, 192.0), None);
    }

    #[test]
    fn sense_measures_probes_and_notifies() {
        let arena = arena();
        let mut agent =
            PlayerEntity::new(Vec2::new(32.0, 32.0), 32.0, 32.0, AgentConfig::default(), Idle)
                .unwrap();
        arena.sense(&mut agent).unwrap();

        assert!(agent.collision_present());
        assert!(agent.collision_flags().left && agent.collision_flags().down);

        // probe 0 points south into the border
        assert!(agent.wall_sensor_collision(0).unwrap());
        assert_eq!(agent.wall_sensor_lengths()[0], 24.0);
        // probe 5 points north across open floor
        assert!(!agent.wall_sensor_collision(5).unwrap());
        assert_eq!(agent.wall_sensor_lengths()[5], 192.0);

        agent.update(0.0).unwrap();
        let end = agent.wall_sensor_endpoint(0).unwrap();
        assert!(end.abs_diff_eq(Vec2::new(48.0, 24.0), 1e-3));
        assert!(!agent.collision_present());
    }

    #[test]
    fn stale_lengths_are_restored_in_open_floor() {
        let arena = Arena::new(30, 30, 32.0, Vec2::ZERO).unwrap();
        let mut agent =
            PlayerEntity::new(Vec2::new(464.0, 464.0), 32.0, 32.0, AgentConfig::default(), Idle)
                .unwrap();
        agent.set_wall_sensor_length(2, 5.0).unwrap();
        agent.set_wall_sensor_collision(2, true).unwrap();

        arena.sense(&mut agent).unwrap();

        assert_eq!(agent.wall_sensor_lengths(), &[192.0; 6]);
        assert!(!agent.wall_sensor_collision(2).unwrap());
        assert!(!agent.collision_present());
    }

    #[test]
    fn pillars_avoid_reserved_tiles() {
        let mut arena = Arena::walled(12, 12, 32.0, Vec2::new(300.0, 300.0)).unwrap();
        let spawn = Vec2::new(48.0, 48.0);
        let mut rng = StdRng::seed_from_u64(7);
        arena.scatter_pillars(30, &[spawn, arena.goal()], &mut rng);
        assert!(!arena.is_blocked(spawn));
        assert!(!arena.is_blocked(arena.goal()));
        // 44 border tiles plus the pillars
        assert!(arena.solid_tiles().count() > 44);
    }
}

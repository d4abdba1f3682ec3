// kinematics and local perception for a steerable agent in a tile arena
pub mod characters;
pub mod error;
pub mod geometry;
pub mod map;
pub mod sensors;

pub use characters::config::AgentConfig;
pub use characters::navigation::{GoalSeeker, Idle, MovementInput, Navigator};
pub use characters::player::{PlayerEntity, PlayerState};
pub use characters::{AgentPlugin, AgentSimPlugin};
pub use error::AgentError;
pub use map::arena::Arena;
pub use map::collision::{CollisionBox, CollisionFlags};

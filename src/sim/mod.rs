//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame deltas come from the caller, already capped
//! - Seeded RNG only, stored in the state
//! - Stable iteration order (walls in generation order)
//! - No rendering, transport or platform dependencies

pub mod camera;
pub mod collision;
pub mod level;
pub mod player;
pub mod state;
pub mod tick;
pub mod tide;
pub mod world;

pub use camera::Camera;
pub use collision::{Contact, Reaction, check_collision, reflect_velocity, resolve};
pub use level::LevelGenerator;
pub use player::{Player, PlayerState, StepReport};
pub use state::{FrameView, GameEvent, GamePhase, GameState, LossCause, Wall, WallKind};
pub use tick::{TickInput, tick};
pub use tide::Tide;
pub use world::World;

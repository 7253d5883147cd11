//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per rendering callback
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod camera;
pub mod level;
pub mod physics;
pub mod state;
pub mod tick;
pub mod world;

pub use level::{Section, Tile, generate_section};
pub use physics::StepEvents;
pub use state::{GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
pub use world::{TileMap, WorldWindow};

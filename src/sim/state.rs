//! Session state: the player, the camera, timers, and the phase machine
//!
//! Everything that must survive a step (and serialize for determinism
//! checks) lives here in one explicit struct; there are no globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::world::WorldWindow;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for a start action
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended; waiting for a replay
    GameOver,
}

/// The player's body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Center of the collision box, world pixels
    pub pos: Vec2,
    /// Velocity in pixels per frame
    pub vel: Vec2,
    /// Standing on ground as of the last vertical resolution
    pub grounded: bool,
    /// Frames left during which a jump is still honored after leaving ground
    pub coyote_ticks: u8,
}

impl Player {
    /// Player at the spawn point, at rest on the baseline floor
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(SPAWN_X, SPAWN_Y),
            vel: Vec2::ZERO,
            grounded: true,
            coyote_ticks: COYOTE_FRAMES,
        }
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG; all terrain and effect randomness flows through here
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Player body
    pub player: Player,
    /// Horizontal scroll offset in world pixels
    pub camera_x: f32,
    /// Materialized terrain
    pub world: WorldWindow,
    /// Farthest world distance reached, in whole tiles
    pub score: u64,
    /// Simulation step counter
    pub time_ticks: u64,
    /// Red overlay frames remaining after a death
    pub death_flash_ticks: u8,
    /// Full-screen storm frames remaining
    pub storm_ticks: u32,
}

impl GameState {
    /// Create a new session sitting at the menu
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let world = WorldWindow::new(&mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::Menu,
            player: Player::spawn(),
            camera_x: 0.0,
            world,
            score: 0,
            time_ticks: 0,
            death_flash_ticks: 0,
            storm_ticks: 0,
        }
    }

    /// (Re)enter `Playing`: fresh single-section terrain, player at spawn,
    /// camera at the world origin, score and timers cleared. Identical from
    /// `Menu` and `GameOver`.
    pub fn start(&mut self) {
        self.player = Player::spawn();
        self.camera_x = 0.0;
        self.world = WorldWindow::new(&mut self.rng);
        self.score = 0;
        self.death_flash_ticks = 0;
        self.storm_ticks = 0;
        self.phase = GamePhase::Playing;
        log::info!("run started");
    }

    /// Death flash intensity for rendering, 1.0 at the moment of death
    /// fading to 0.0
    pub fn flash_intensity(&self) -> f32 {
        self.death_flash_ticks as f32 / DEATH_FLASH_FRAMES as f32
    }

    /// Whether the rare full-screen storm is running
    pub fn storm_active(&self) -> bool {
        self.storm_ticks > 0
    }
}

//! Per-frame simulation step
//!
//! One call advances the whole session by a single frame: input, physics,
//! camera, terrain maintenance, and the phase machine, strictly in that
//! order. Nothing here blocks or defers; timed effects are plain frame
//! counters decremented as they pass through.

use rand::Rng;

use super::camera;
use super::physics::{self, StepEvents};
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input snapshot for a single step. `left`/`right` mirror held keys;
/// `jump` and `start` are edge-triggered one-shots the caller clears after
/// the step that consumed them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move left is held
    pub left: bool,
    /// Move right is held
    pub right: bool,
    /// Jump was just pressed
    pub jump: bool,
    /// Start/replay was just pressed
    pub start: bool,
}

impl TickInput {
    /// Held movement axis: -1, 0, or +1
    pub fn dir(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> StepEvents {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => {
            // Timed effects keep counting down over the menu and game-over
            // screens; nothing else moves.
            state.death_flash_ticks = state.death_flash_ticks.saturating_sub(1);
            state.storm_ticks = state.storm_ticks.saturating_sub(1);
            if input.start {
                state.start();
            }
            StepEvents::default()
        }
        GamePhase::Playing => {
            let events = physics::step(&mut state.player, input.dir(), input.jump, &state.world);

            // The camera chases the corrected position, then terrain is
            // topped up ahead of it so next frame's resolution always has
            // materialized tiles under the whole view.
            state.camera_x = camera::update(state.player.pos.x, state.camera_x);
            state.world.ensure_ahead(state.camera_x, &mut state.rng);
            state.world.evict_behind();

            // Score is the farthest column the camera has reached; backing
            // up never lowers it.
            state.score = state.score.max((state.camera_x / TILE_SIZE) as u64);

            if events.died {
                state.phase = GamePhase::GameOver;
                state.death_flash_ticks = DEATH_FLASH_FRAMES;
                if state.rng.random_bool(STORM_CHANCE) {
                    state.storm_ticks = STORM_FRAMES;
                }
                log::info!("run over at score {}", state.score);
            }

            events
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use glam::Vec2;

    #[test]
    fn test_menu_start_enters_playing() {
        let mut state = GameState::new(11);
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Menu);

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.world.sections().len(), 1);
    }

    #[test]
    fn test_replay_reset_is_idempotent() {
        let mut state = GameState::new(11);
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start);

        // Run a while, then force a few deaths and replays of varying length
        let run = TickInput {
            right: true,
            ..Default::default()
        };
        for session in 0..3 {
            for _ in 0..(200 * (session + 1)) {
                tick(&mut state, &run);
            }
            state.phase = GamePhase::GameOver;
            tick(&mut state, &start);

            assert_eq!(state.phase, GamePhase::Playing);
            assert_eq!(state.score, 0);
            assert_eq!(state.camera_x, 0.0);
            assert_eq!(state.world.sections().len(), 1);
            assert_eq!(state.world.evicted_offset(), 0.0);
            assert_eq!(state.player.pos, Vec2::new(SPAWN_X, SPAWN_Y));
        }
    }

    #[test]
    fn test_death_enters_game_over_with_flash() {
        let mut state = GameState::new(17);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );

        // Drop the player past the bottom of the world
        state.player.pos.y = VIEW_HEIGHT * 2.0;
        state.player.grounded = false;

        let events = tick(&mut state, &TickInput::default());
        assert!(events.died);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.death_flash_ticks, DEATH_FLASH_FRAMES);
        // The storm either skipped or runs its full length
        assert!(state.storm_ticks == 0 || state.storm_ticks == STORM_FRAMES);
    }

    #[test]
    fn test_game_over_counts_timers_down_and_freezes_the_world() {
        let mut state = GameState::new(17);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        state.phase = GamePhase::GameOver;
        state.death_flash_ticks = 2;
        state.storm_ticks = 3;
        let frozen_pos = state.player.pos;
        let frozen_score = state.score;

        for _ in 0..3 {
            tick(
                &mut state,
                &TickInput {
                    right: true,
                    jump: true,
                    ..Default::default()
                },
            );
        }

        assert_eq!(state.death_flash_ticks, 0);
        assert_eq!(state.storm_ticks, 0);
        assert!(!state.storm_active());
        assert_eq!(state.player.pos, frozen_pos);
        assert_eq!(state.score, frozen_score);
    }

    #[test]
    fn test_spawn_rests_through_an_idle_step() {
        let mut state = GameState::new(3);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        let spawn = state.player.pos;

        // Gravity pulls into the baseline and resolves straight back out
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.pos, spawn);
        assert_eq!(state.player.vel.y, 0.0);
        assert!(state.player.grounded);
    }

    #[test]
    fn test_score_tracks_farthest_distance() {
        let mut state = GameState::new(23);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );

        let mut run = TickInput {
            right: true,
            ..Default::default()
        };
        let back = TickInput {
            left: true,
            ..Default::default()
        };
        let mut farthest_col = 0u64;
        for frame in 0..400u32 {
            run.jump = frame % 35 == 0;
            tick(&mut state, &run);
            if state.phase != GamePhase::Playing {
                break;
            }
            farthest_col = farthest_col.max((state.camera_x / TILE_SIZE) as u64);
            assert_eq!(state.score, farthest_col);
        }

        let peak = state.score;
        for _ in 0..100 {
            tick(&mut state, &back);
        }
        assert_eq!(state.score, peak);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut a = GameState::new(99_999);
        let mut b = GameState::new(99_999);

        let script = |frame: u64| TickInput {
            start: frame == 0,
            right: frame % 7 != 0,
            left: frame % 13 == 0,
            jump: frame % 40 == 0,
        };

        for frame in 0..600 {
            let input = script(frame);
            tick(&mut a, &input);
            tick(&mut b, &input);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.camera_x, b.camera_x);
        assert_eq!(a.score, b.score);
        assert_eq!(
            serde_json::to_string(&a.world).unwrap(),
            serde_json::to_string(&b.world).unwrap()
        );
    }

    #[test]
    fn test_long_run_keeps_window_invariants() {
        let mut state = GameState::new(7);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );

        let mut input = TickInput {
            right: true,
            ..Default::default()
        };
        for frame in 0..5_000u32 {
            input.jump = frame % 45 == 0;
            input.start = state.phase == GamePhase::GameOver;
            let was_playing = state.phase == GamePhase::Playing;
            tick(&mut state, &input);

            assert!(state.world.sections().len() <= SECTION_CAP);
            assert!(state.camera_x >= 0.0);
            // After a playing step the materialized terrain covers the view
            // plus the lookahead margin
            if was_playing {
                let needed =
                    state.camera_x + VIEW_WIDTH + LOOKAHEAD_TILES as f32 * TILE_SIZE;
                assert!(state.world.right_edge() >= needed);
            }
        }
    }
}

//! Dead-band scrolling camera
//!
//! The camera only moves when the player presses against one edge of a
//! horizontal dead-band, which gives the asymmetric "runner" feel: it leads
//! a player running forward and lags one backing up, and it never scrolls
//! behind the world origin.

use crate::consts::*;

/// Screen-space x the player is held at while pushing forward
pub const FORWARD_BOUND: f32 = VIEW_WIDTH / 3.0;
/// Screen-space x the player is held at while pushing backward
pub const BACKWARD_BOUND: f32 = FORWARD_BOUND / 2.0;

/// Advance the camera toward the player's corrected position.
///
/// Moves exactly far enough to put the player back on the violated bound;
/// inside the band the camera holds still.
pub fn update(player_x: f32, camera_x: f32) -> f32 {
    let screen_x = player_x - camera_x;
    let next = if screen_x > FORWARD_BOUND {
        player_x - FORWARD_BOUND
    } else if screen_x < BACKWARD_BOUND {
        player_x - BACKWARD_BOUND
    } else {
        camera_x
    };
    next.max(0.0)
}

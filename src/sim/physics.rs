//! Player physics and tile collision
//!
//! Movement integrates and resolves one axis at a time: move along x, push
//! out of any solid tile, then the same along y. The axis split is what
//! keeps fast corners honest; a diagonal step can never slip through the
//! seam between two tiles because each axis sees the other's corrected
//! position.

use super::level::Tile;
use super::state::Player;
use super::world::TileMap;
use crate::consts::*;
use crate::{tile_to_world, world_to_tile};

/// What a resolution step observed, for the state machine and the audio
/// collaborator. `died` covers hazard contact and falling out of the world;
/// it may be set by either axis pass but fires effects once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepEvents {
    /// A jump launched this step
    pub jumped: bool,
    /// The player landed on ground this step
    pub landed: bool,
    /// Hazard contact or a fall past the world's bottom
    pub died: bool,
}

/// Advance the player by one step against `map`.
///
/// `dir` is the held movement axis (-1, 0, +1); `jump` is the edge-triggered
/// jump request, honored while grounded or inside the coyote window.
pub fn step(player: &mut Player, dir: f32, jump: bool, map: &impl TileMap) -> StepEvents {
    let mut events = StepEvents::default();

    // Horizontal speed comes straight from input; there is no acceleration
    // curve.
    player.vel.x = dir * RUN_SPEED;

    if jump && (player.grounded || player.coyote_ticks > 0) {
        player.vel.y = -JUMP_POWER;
        player.grounded = false;
        player.coyote_ticks = 0;
        events.jumped = true;
    }

    // Gravity accumulates every step. MAX_FALL_SPEED is infinity with the
    // stock tuning.
    player.vel.y = (player.vel.y + GRAVITY).min(MAX_FALL_SPEED);

    player.pos.x += player.vel.x;
    resolve_horizontal(player, map, &mut events);

    let was_grounded = player.grounded;
    player.grounded = false;
    player.pos.y += player.vel.y;
    resolve_vertical(player, map, &mut events);

    if player.grounded {
        player.coyote_ticks = COYOTE_FRAMES;
        events.landed = !was_grounded;
    } else {
        player.coyote_ticks = player.coyote_ticks.saturating_sub(1);
    }

    // Falling past the bottom of the view is fatal even though the baseline
    // floor normally makes it unreachable.
    if player.pos.y - PLAYER_HALF_HEIGHT > VIEW_HEIGHT {
        events.died = true;
    }

    events
}

/// Inclusive tile range covering the player's box
fn tile_span(player: &Player) -> (i64, i64, i64, i64) {
    (
        world_to_tile(player.pos.x - PLAYER_HALF_WIDTH),
        world_to_tile(player.pos.x + PLAYER_HALF_WIDTH),
        world_to_tile(player.pos.y - PLAYER_HALF_HEIGHT),
        world_to_tile(player.pos.y + PLAYER_HALF_HEIGHT),
    )
}

/// Strict AABB overlap with one tile; edge contact does not count, so a body
/// resting flush on a surface is not "inside" it.
fn overlaps(player: &Player, col: i64, row: i64) -> bool {
    let left = tile_to_world(col);
    let top = tile_to_world(row);
    player.pos.x - PLAYER_HALF_WIDTH < left + TILE_SIZE
        && player.pos.x + PLAYER_HALF_WIDTH > left
        && player.pos.y - PLAYER_HALF_HEIGHT < top + TILE_SIZE
        && player.pos.y + PLAYER_HALF_HEIGHT > top
}

fn resolve_horizontal(player: &mut Player, map: &impl TileMap, events: &mut StepEvents) {
    let (min_col, max_col, min_row, max_row) = tile_span(player);
    for row in min_row..=max_row {
        for col in min_col..=max_col {
            let tile = map.tile_at(col, row);
            if tile == Tile::Empty || !overlaps(player, col, row) {
                continue;
            }
            if tile.is_lethal() {
                events.died = true;
                continue;
            }
            let left = tile_to_world(col);
            if player.vel.x > 0.0 {
                player.pos.x = left - PLAYER_HALF_WIDTH;
                player.vel.x = 0.0;
            } else if player.vel.x < 0.0 {
                player.pos.x = left + TILE_SIZE + PLAYER_HALF_WIDTH;
                player.vel.x = 0.0;
            }
        }
    }
}

fn resolve_vertical(player: &mut Player, map: &impl TileMap, events: &mut StepEvents) {
    let (min_col, max_col, min_row, max_row) = tile_span(player);
    for row in min_row..=max_row {
        for col in min_col..=max_col {
            let tile = map.tile_at(col, row);
            if tile == Tile::Empty || !overlaps(player, col, row) {
                continue;
            }
            if tile.is_lethal() {
                events.died = true;
                continue;
            }
            let top = tile_to_world(row);
            if player.vel.y > 0.0 {
                // Falling into the tile: land on its top edge
                player.pos.y = top - PLAYER_HALF_HEIGHT;
                player.vel.y = 0.0;
                player.grounded = true;
            } else if player.vel.y < 0.0 {
                // Rising into the tile: bonk on its underside
                player.pos.y = top + TILE_SIZE + PLAYER_HALF_HEIGHT;
                player.vel.y = 0.0;
            }
        }
    }
}

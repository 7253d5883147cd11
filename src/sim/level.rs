//! Terrain sections and the procedural generator
//!
//! A section is one screen-sized slab of tile grid. Generation walks
//! platforms left to right with bounded row deltas, which is what keeps the
//! endless terrain traversable: no ledge is ever more than one row away from
//! the previous one, and no gap is wider than a running jump clears.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Ground,
    Hazard,
}

impl Tile {
    /// Tiles the player collides with
    #[inline]
    pub fn is_solid(self) -> bool {
        self == Tile::Ground
    }

    /// Tiles that kill on contact
    #[inline]
    pub fn is_lethal(self) -> bool {
        self == Tile::Hazard
    }
}

/// A fixed-size slab of generated terrain, immutable once built
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Sequence index assigned at append time; never reused. The section's
    /// world-space column origin is `index * SECTION_COLS`.
    index: u64,
    /// Row-major grid, `SECTION_ROWS * SECTION_COLS` cells
    tiles: Vec<Tile>,
}

impl Section {
    /// Sequence index in the endless world
    pub fn index(&self) -> u64 {
        self.index
    }

    /// World-space column of this section's left edge
    pub fn origin_col(&self) -> u64 {
        self.index * SECTION_COLS as u64
    }

    /// Tile at local (col, row); anything off the grid reads as `Empty`
    pub fn tile(&self, col: usize, row: usize) -> Tile {
        if col >= SECTION_COLS || row >= SECTION_ROWS {
            return Tile::Empty;
        }
        self.tiles[row * SECTION_COLS + col]
    }

    fn set(&mut self, col: usize, row: usize, tile: Tile) {
        debug_assert!(col < SECTION_COLS && row < SECTION_ROWS);
        self.tiles[row * SECTION_COLS + col] = tile;
    }
}

/// Generate one terrain section.
///
/// Layout rules:
/// - the bottom row is solid ground end to end, so a section is never
///   bottomless
/// - platforms are 3-7 tiles long with 1-4 tile gaps between them
/// - each platform sits at most one row above or below the previous one
/// - a platform has at most one hazard, on the row just above it
///
/// A section whose walk places zero platforms (first length draw doesn't
/// fit) is still valid; consumers only ever see the baseline floor.
pub fn generate_section(index: u64, rng: &mut impl Rng) -> Section {
    generate_with(index, rng, HAZARD_CHANCE)
}

fn generate_with(index: u64, rng: &mut impl Rng, hazard_chance: f64) -> Section {
    let mut section = Section {
        index,
        tiles: vec![Tile::Empty; SECTION_ROWS * SECTION_COLS],
    };

    // Baseline floor
    for col in 0..SECTION_COLS {
        section.set(col, SECTION_ROWS - 1, Tile::Ground);
    }

    // Platform walk: first platform starts at the left edge, each later one
    // starts a gap after the previous end. Stop once a platform would
    // overhang the section's right edge.
    let mut row = PLATFORM_START_ROW;
    let mut col = 0usize;
    loop {
        let len = rng.random_range(PLATFORM_LEN_MIN..=PLATFORM_LEN_MAX);
        if col + len > SECTION_COLS {
            break;
        }
        for c in col..col + len {
            section.set(c, row, Tile::Ground);
        }
        if rng.random_bool(hazard_chance) {
            let hazard_col = rng.random_range(col..col + len);
            section.set(hazard_col, row - 1, Tile::Hazard);
        }

        col += len + rng.random_range(GAP_MIN..=GAP_MAX);
        let delta = rng.random_range(-1i32..=1);
        row = (row as i32 + delta).clamp(PLATFORM_ROW_MIN as i32, PLATFORM_ROW_MAX as i32) as usize;
    }

    section
}

//! The materialized slice of the endless world
//!
//! Sections are appended ahead of the camera and dropped once they fall far
//! enough behind. A dropped section's width is folded into an offset instead
//! of reindexing anything, so world coordinates stay meaningful for the whole
//! run no matter how far the camera travels.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::level::{Section, Tile, generate_section};
use crate::consts::*;

/// Tile lookup surface the physics resolver scans against
pub trait TileMap {
    /// Tile at a world-space tile coordinate; out-of-range reads are `Empty`
    fn tile_at(&self, col: i64, row: i64) -> Tile;
}

/// The bounded, shifting set of materialized sections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldWindow {
    /// Materialized sections, oldest first
    sections: Vec<Section>,
    /// Tile columns consumed by evicted sections
    evicted_cols: u64,
    /// Sequence index the next appended section receives
    next_index: u64,
}

impl WorldWindow {
    /// Fresh window holding a single generated section and no evicted offset
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut window = Self {
            sections: Vec::with_capacity(SECTION_CAP + 1),
            evicted_cols: 0,
            next_index: 0,
        };
        window.append(rng);
        window
    }

    fn append(&mut self, rng: &mut impl Rng) {
        let section = generate_section(self.next_index, rng);
        log::debug!(
            "materialized section {} at col {}",
            section.index(),
            section.origin_col()
        );
        self.next_index += 1;
        self.sections.push(section);
    }

    /// World-space x of the right edge of materialized terrain, in pixels
    pub fn right_edge(&self) -> f32 {
        let cols = self.evicted_cols + (self.sections.len() * SECTION_COLS) as u64;
        cols as f32 * TILE_SIZE
    }

    /// Pixel width consumed by evicted sections
    pub fn evicted_offset(&self) -> f32 {
        self.evicted_cols as f32 * TILE_SIZE
    }

    /// Append sections until the camera's lookahead margin fits inside the
    /// materialized range.
    pub fn ensure_ahead(&mut self, camera_x: f32, rng: &mut impl Rng) {
        let needed = camera_x + VIEW_WIDTH + LOOKAHEAD_TILES as f32 * TILE_SIZE;
        while self.right_edge() < needed {
            self.append(rng);
        }
    }

    /// Drop sections beyond the retention cap, oldest first, folding their
    /// width into the evicted offset.
    pub fn evict_behind(&mut self) {
        while self.sections.len() > SECTION_CAP {
            let old = self.sections.remove(0);
            self.evicted_cols += SECTION_COLS as u64;
            log::debug!("evicted section {}", old.index());
        }
    }

    /// Currently materialized sections, oldest first (for rendering)
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

impl TileMap for WorldWindow {
    fn tile_at(&self, col: i64, row: i64) -> Tile {
        if col < 0 || row < 0 || row >= SECTION_ROWS as i64 {
            return Tile::Empty;
        }
        // Columns behind the evicted offset no longer exist; fail closed.
        let Some(local) = (col as u64).checked_sub(self.evicted_cols) else {
            return Tile::Empty;
        };
        let Some(section) = self.sections.get((local / SECTION_COLS as u64) as usize) else {
            return Tile::Empty;
        };
        section.tile((local % SECTION_COLS as u64) as usize, row as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_window_holds_one_section() {
        let mut rng = Pcg32::seed_from_u64(1);
        let window = WorldWindow::new(&mut rng);
        assert_eq!(window.sections().len(), 1);
        assert_eq!(window.evicted_offset(), 0.0);
        assert_eq!(window.right_edge(), SECTION_COLS as f32 * TILE_SIZE);
    }

    #[test]
    fn test_ensure_ahead_materializes_the_lookahead() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut window = WorldWindow::new(&mut rng);

        window.ensure_ahead(0.0, &mut rng);
        let needed = VIEW_WIDTH + LOOKAHEAD_TILES as f32 * TILE_SIZE;
        assert!(window.right_edge() >= needed);

        // Already covered: no further growth
        let count = window.sections().len();
        window.ensure_ahead(0.0, &mut rng);
        assert_eq!(window.sections().len(), count);
    }

    #[test]
    fn test_evict_keeps_cap_and_accumulates_offset() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut window = WorldWindow::new(&mut rng);

        // Drive the camera two sections in so the window overfills
        let section_px = SECTION_COLS as f32 * TILE_SIZE;
        window.ensure_ahead(section_px * 2.0, &mut rng);
        assert!(window.sections().len() > SECTION_CAP);

        window.evict_behind();
        assert_eq!(window.sections().len(), SECTION_CAP);
        let evicted = window.sections()[0].index();
        assert_eq!(window.evicted_offset(), evicted as f32 * section_px);
    }

    #[test]
    fn test_eviction_preserves_visible_lookups() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut window = WorldWindow::new(&mut rng);
        let section_px = SECTION_COLS as f32 * TILE_SIZE;
        window.ensure_ahead(section_px * 2.0, &mut rng);

        // Snapshot every tile of the sections that survive the eviction
        let survivor_start =
            (window.sections().len() - SECTION_CAP) as i64 * SECTION_COLS as i64;
        let survivor_end = window.sections().len() as i64 * SECTION_COLS as i64;
        let before: Vec<Tile> = (survivor_start..survivor_end)
            .flat_map(|col| (0..SECTION_ROWS as i64).map(move |row| (col, row)))
            .map(|(col, row)| window.tile_at(col, row))
            .collect();

        window.evict_behind();

        let after: Vec<Tile> = (survivor_start..survivor_end)
            .flat_map(|col| (0..SECTION_ROWS as i64).map(move |row| (col, row)))
            .map(|(col, row)| window.tile_at(col, row))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_tile_at_fails_closed() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut window = WorldWindow::new(&mut rng);
        assert_eq!(window.tile_at(-1, 0), Tile::Empty);
        assert_eq!(window.tile_at(0, -1), Tile::Empty);
        assert_eq!(window.tile_at(0, SECTION_ROWS as i64), Tile::Empty);
        assert_eq!(window.tile_at(SECTION_COLS as i64 * 10, 0), Tile::Empty);

        // Behind the evicted offset
        let section_px = SECTION_COLS as f32 * TILE_SIZE;
        window.ensure_ahead(section_px * 2.0, &mut rng);
        window.evict_behind();
        assert!(window.evicted_offset() > 0.0);
        assert_eq!(window.tile_at(0, SECTION_ROWS as i64 - 1), Tile::Empty);
    }

    #[test]
    fn test_baseline_reads_through_world_coordinates() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut window = WorldWindow::new(&mut rng);
        window.ensure_ahead(0.0, &mut rng);

        let last_col = (window.sections().len() * SECTION_COLS) as i64 - 1;
        for col in 0..=last_col {
            assert_eq!(window.tile_at(col, SECTION_ROWS as i64 - 1), Tile::Ground);
        }
    }
}

//! Canvas 2D rendering of the visible world slice
//!
//! Drawing is deliberately dumb: the simulation hands over tile grids, the
//! player box, the camera offset, and presentation state; this module fills
//! rectangles and text. Nothing here feeds back into the simulation.

use std::ops::Range;

use crate::consts::*;
use crate::world_to_tile;

/// World-space tile columns overlapping the view at a camera position
pub fn visible_columns(camera_x: f32) -> Range<i64> {
    let first = world_to_tile(camera_x);
    let last = world_to_tile(camera_x + VIEW_WIDTH - 1.0);
    first..last + 1
}

#[cfg(target_arch = "wasm32")]
pub use web::Renderer;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use super::visible_columns;
    use crate::Settings;
    use crate::consts::*;
    use crate::sim::{GamePhase, GameState, Tile};

    const SKY: &str = "#10182c";
    const GROUND: &str = "#3f7d3a";
    const GROUND_EDGE: &str = "#6aa84f";
    const HAZARD: &str = "#c0392b";
    const PLAYER: &str = "#e8a33d";

    /// Canvas-backed renderer
    pub struct Renderer {
        ctx: CanvasRenderingContext2d,
    }

    impl Renderer {
        pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
            canvas.set_width(VIEW_WIDTH as u32);
            canvas.set_height(VIEW_HEIGHT as u32);
            let ctx = canvas
                .get_context("2d")?
                .ok_or_else(|| JsValue::from_str("no 2d context"))?
                .dyn_into::<CanvasRenderingContext2d>()?;
            Ok(Self { ctx })
        }

        /// Draw one frame
        pub fn render(&self, state: &GameState, settings: &Settings, fps: u32) {
            self.ctx.set_global_alpha(1.0);
            self.ctx.set_fill_style_str(SKY);
            self.ctx
                .fill_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);

            self.draw_tiles(state);
            self.draw_player(state);
            self.draw_overlays(state, settings);
            self.draw_hud(state, settings, fps);
        }

        fn draw_tiles(&self, state: &GameState) {
            let visible = visible_columns(state.camera_x);
            let tile = TILE_SIZE as f64;

            for section in state.world.sections() {
                let origin = section.origin_col() as i64;
                // Cull whole sections outside the view
                if origin + SECTION_COLS as i64 <= visible.start || origin >= visible.end {
                    continue;
                }
                for row in 0..SECTION_ROWS {
                    let sy = row as f64 * tile;
                    for col in 0..SECTION_COLS {
                        let world_col = origin + col as i64;
                        if !visible.contains(&world_col) {
                            continue;
                        }
                        let sx = world_col as f64 * tile - state.camera_x as f64;
                        match section.tile(col, row) {
                            Tile::Empty => {}
                            Tile::Ground => {
                                self.ctx.set_fill_style_str(GROUND);
                                self.ctx.fill_rect(sx, sy, tile, tile);
                                self.ctx.set_fill_style_str(GROUND_EDGE);
                                self.ctx.fill_rect(sx, sy, tile, 4.0);
                            }
                            Tile::Hazard => {
                                // Spikes: a low slab with teeth
                                self.ctx.set_fill_style_str(HAZARD);
                                self.ctx.fill_rect(sx, sy + tile * 0.5, tile, tile * 0.5);
                                self.ctx.fill_rect(sx + tile * 0.2, sy + tile * 0.2, 4.0, tile * 0.3);
                                self.ctx.fill_rect(sx + tile * 0.6, sy + tile * 0.2, 4.0, tile * 0.3);
                            }
                        }
                    }
                }
            }
        }

        fn draw_player(&self, state: &GameState) {
            let px = (state.player.pos.x - PLAYER_HALF_WIDTH - state.camera_x) as f64;
            let py = (state.player.pos.y - PLAYER_HALF_HEIGHT) as f64;
            self.ctx.set_fill_style_str(PLAYER);
            self.ctx
                .fill_rect(px, py, PLAYER_WIDTH as f64, PLAYER_HEIGHT as f64);
        }

        fn draw_overlays(&self, state: &GameState, settings: &Settings) {
            let w = VIEW_WIDTH as f64;
            let h = VIEW_HEIGHT as f64;

            if settings.effective_storm() && state.storm_active() {
                // Cold full-screen wash while the storm runs
                self.ctx.set_global_alpha(0.25);
                self.ctx.set_fill_style_str("#9ecfff");
                self.ctx.fill_rect(0.0, 0.0, w, h);
                self.ctx.set_global_alpha(1.0);
            }

            if settings.effective_death_flash() && state.flash_intensity() > 0.0 {
                self.ctx.set_global_alpha((state.flash_intensity() * 0.6) as f64);
                self.ctx.set_fill_style_str(HAZARD);
                self.ctx.fill_rect(0.0, 0.0, w, h);
                self.ctx.set_global_alpha(1.0);
            }

            match state.phase {
                GamePhase::Playing => {}
                GamePhase::Menu => {
                    self.dim(0.55);
                    self.center_text("TILE RUNNER", h / 2.0 - 40.0, "48px monospace");
                    self.center_text("Press Enter to start", h / 2.0 + 20.0, "20px monospace");
                }
                GamePhase::GameOver => {
                    self.dim(0.55);
                    self.center_text("GAME OVER", h / 2.0 - 40.0, "48px monospace");
                    self.center_text(
                        &format!("Distance: {}", state.score),
                        h / 2.0 + 10.0,
                        "24px monospace",
                    );
                    self.center_text("Press Enter to retry", h / 2.0 + 50.0, "20px monospace");
                }
            }
        }

        fn draw_hud(&self, state: &GameState, settings: &Settings, fps: u32) {
            self.ctx.set_fill_style_str("#f0f0f0");
            self.ctx.set_text_align("left");
            self.ctx.set_font("20px monospace");
            let _ = self
                .ctx
                .fill_text(&format!("Distance: {}", state.score), 12.0, 28.0);
            if settings.show_fps {
                let _ = self.ctx.fill_text(&format!("{fps} fps"), 12.0, 52.0);
            }
        }

        fn dim(&self, alpha: f64) {
            self.ctx.set_global_alpha(alpha);
            self.ctx.set_fill_style_str("#000000");
            self.ctx
                .fill_rect(0.0, 0.0, VIEW_WIDTH as f64, VIEW_HEIGHT as f64);
            self.ctx.set_global_alpha(1.0);
        }

        fn center_text(&self, text: &str, y: f64, font: &str) {
            self.ctx.set_fill_style_str("#f0f0f0");
            self.ctx.set_text_align("center");
            self.ctx.set_font(font);
            let _ = self.ctx.fill_text(text, VIEW_WIDTH as f64 / 2.0, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_columns_at_origin() {
        let cols = visible_columns(0.0);
        assert_eq!(cols.start, 0);
        // 800px view over 32px tiles
        assert_eq!(cols.end, 25);
    }

    #[test]
    fn test_visible_columns_mid_scroll() {
        // Camera partway into a tile widens the range by one
        let cols = visible_columns(16.0);
        assert_eq!(cols.start, 0);
        assert_eq!(cols.end, 26);
    }

    #[test]
    fn test_visible_columns_deep_in_the_run() {
        let cols = visible_columns(3_200.0);
        assert_eq!(cols.start, 100);
        assert_eq!(cols.end, 125);
    }
}

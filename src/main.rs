//! Tile Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use tile_runner::audio::{AudioManager, SoundEffect};
    use tile_runner::consts::*;
    use tile_runner::renderer::Renderer;
    use tile_runner::settings::Settings;
    use tile_runner::sim::{GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Renderer,
        audio: AudioManager,
        settings: Settings,
        input: TickInput,
        accumulator: f32,
        last_time: f64,
        /// Mute chosen by the player, as opposed to the blur auto-mute
        user_muted: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, renderer: Renderer) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);

            Self {
                state: GameState::new(seed),
                renderer,
                audio,
                settings,
                input: TickInput::default(),
                accumulator: 0.0,
                last_time: 0.0,
                user_muted: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation steps to catch up with wall time
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut steps = 0;
            while self.accumulator >= FRAME_DT && steps < MAX_STEPS_PER_FRAME {
                let input = self.input;
                let events = tick(&mut self.state, &input);
                self.accumulator -= FRAME_DT;
                steps += 1;

                if events.jumped {
                    self.audio.play(SoundEffect::Jump);
                }
                if events.landed {
                    self.audio.play(SoundEffect::Land);
                }
                if events.died {
                    self.audio.play(SoundEffect::Death);
                }

                // Clear one-shot inputs after processing
                self.input.jump = false;
                self.input.start = false;
            }

            // Track frame times for the FPS counter
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60_000.0 / elapsed).round() as u32;
                }
            }
        }

        fn render(&self) {
            self.renderer.render(&self.state, &self.settings, self.fps);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tile Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let renderer = Renderer::new(&canvas).expect("2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, renderer)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_blur_mute(game.clone());

        request_animation_frame(game);

        log::info!("Tile Runner running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keydown: held directions plus one-shot jump/start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = true,
                    "ArrowRight" | "d" | "D" => g.input.right = true,
                    "ArrowUp" | " " | "w" | "W" => {
                        // Key repeat must not re-fire an edge-triggered jump
                        if !event.repeat() {
                            g.input.jump = true;
                        }
                        event.prevent_default();
                    }
                    "Enter" => {
                        g.input.start = true;
                        // Start counts as the user gesture audio needs
                        g.audio.resume();
                    }
                    "m" | "M" => {
                        let muted = g.audio.toggle_muted();
                        g.user_muted = muted;
                        log::info!("audio muted: {muted}");
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup: release held directions
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = false,
                    "ArrowRight" | "d" | "D" => g.input.right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_blur_mute(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let user_muted = g.user_muted;
                g.audio.set_muted(user_muted);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            g.last_time = time;
            g.update(dt, time);
            g.render();
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use tile_runner::consts::*;
    use tile_runner::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed);
    log::info!("Tile Runner (native) seed {seed}");

    // Headless demo: hold right and hop every half second until the run
    // ends or a simulated minute passes.
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
    for frame in 0..FRAME_RATE as u64 * 60 {
        input.jump = frame % 30 == 0;
        tick(&mut state, &input);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "Run over: distance {} after {} frames",
        state.score, state.time_ticks
    );
}

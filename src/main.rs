//! Crate Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop: the
//! browser build drives one tick + one render pass per animation frame,
//! the native build runs a short headless smoke session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use crate_breaker::consts::*;
    use crate_breaker::render::{DrawSurface, Material, Scene, ShapeKind};
    use crate_breaker::sim::{GameSession, TickInput, tick};
    use glam::Mat4;

    // Draw bindings provided by the host page. The page skips any call
    // whose asset has not finished loading; the scene re-issues every call
    // next frame anyway.
    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = host, js_name = beginFrame)]
        fn host_begin_frame();
        #[wasm_bindgen(js_namespace = host, js_name = drawShape)]
        fn host_draw_shape(shape: &str, matrix: &[f32], color: &[f32], texture: Option<&str>);
        #[wasm_bindgen(js_namespace = host, js_name = drawLabel)]
        fn host_draw_label(text: &str, matrix: &[f32]);
    }

    /// Forwards scene draw calls to the host page
    struct HostSurface;

    impl DrawSurface for HostSurface {
        fn draw(&mut self, shape: ShapeKind, transform: Mat4, material: &Material) {
            let name = match shape {
                ShapeKind::Cube => "cube",
                ShapeKind::Sphere => "sphere",
                ShapeKind::Mesh(name) => name,
            };
            host_draw_shape(
                name,
                &transform.to_cols_array(),
                &material.color,
                material.texture,
            );
        }

        fn draw_text(&mut self, text: &str, transform: Mat4) {
            host_draw_label(text, &transform.to_cols_array());
        }
    }

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        scene: Scene,
        input: TickInput,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                session: GameSession::new(seed),
                scene: Scene::new(),
                input: TickInput::default(),
                last_time: 0.0,
            }
        }

        /// One animation-frame callback: exactly one tick, one render pass
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
            };
            self.last_time = time;
            let dt = dt.min(MAX_FRAME_DT);

            let input = self.input;
            tick(&mut self.session, &input, dt);

            // Clear one-shot inputs after processing
            self.input.restart = false;
            self.input.cheat = false;

            host_begin_frame();
            self.scene.render(&self.session, &mut HostSurface);
        }

        /// Dump the full session state to the console (debug aid)
        fn log_snapshot(&self) {
            match serde_json::to_string(&self.session) {
                Ok(json) => log::info!("session snapshot: {json}"),
                Err(e) => log::warn!("snapshot failed: {e}"),
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Crate Breaker starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));

        setup_key_handlers(game.clone());
        setup_restart_button(game.clone());
        request_animation_frame(game);

        log::info!("Crate Breaker running with seed {seed}");
    }

    fn setup_key_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "x" | "X" => g.input.move_left = true,
                    "ArrowRight" | "c" | "C" => g.input.move_right = true,
                    "r" | "R" | "Enter" => g.input.restart = true,
                    "g" | "G" => g.input.cheat = true,
                    "p" | "P" => g.log_snapshot(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "x" | "X" => g.input.move_left = false,
                    "ArrowRight" | "c" | "C" => g.input.move_right = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.restart = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
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
    env_logger::init();
    log::info!("Crate Breaker (native) starting...");

    run_headless_smoke();
}

/// Play a couple of minutes of game time with a trivial ball-tracking
/// policy, then print where the run ended up
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_smoke() {
    use crate_breaker::sim::{GamePhase, GameSession, TickInput, tick};

    let seed = std::time::UNIX_EPOCH
        .elapsed()
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut session = GameSession::new(seed);
    tick(
        &mut session,
        &TickInput {
            restart: true,
            ..TickInput::default()
        },
        1.0 / 60.0,
    );

    let dt = 1.0 / 60.0;
    let mut frames = 0u32;
    while session.phase == GamePhase::Playing && frames < 60 * 120 {
        let input = TickInput {
            move_left: session.ball.pos.x < session.paddle.pos.x - 1.0,
            move_right: session.ball.pos.x > session.paddle.pos.x + 1.0,
            ..TickInput::default()
        };
        tick(&mut session, &input, dt);
        frames += 1;
    }

    println!(
        "seed {seed}: {:?} after {frames} frames, score {}, lives {}",
        session.phase, session.score, session.lives
    );
    match serde_json::to_string(&session) {
        Ok(json) => log::debug!("final session snapshot: {json}"),
        Err(e) => log::warn!("snapshot failed: {e}"),
    }
}

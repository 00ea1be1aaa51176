//! Plane Dodger entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build wires DOM input, HUD text, and audio cues to the
//! simulation; entity drawing is left to the embedding page, which reads
//! the state snapshot after each tick.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use plane_dodger::sim::{GamePhase, GameState, TickInput, Viewport, tick};
    use plane_dodger::{AudioManager, Settings};

    /// Game instance holding all state
    struct App {
        state: GameState,
        input: TickInput,
        audio: AudioManager,
        canvas: HtmlCanvasElement,
        last_time: f64,
        last_phase: GamePhase,
    }

    impl App {
        fn new(seed: u64, canvas: HtmlCanvasElement, settings: &Settings) -> Self {
            let viewport = canvas_viewport(&canvas);
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_muted(settings.muted);
            Self {
                state: GameState::new(seed, &viewport),
                input: TickInput::default(),
                audio,
                canvas,
                last_time: 0.0,
                last_phase: GamePhase::Menu,
            }
        }

        /// Start or restart a run from the menu/game-over screens
        fn start(&mut self) {
            let viewport = canvas_viewport(&self.canvas);
            self.state.start(&viewport);
            self.audio.resume();

            let document = document();
            set_overlay_active(&document, "menu-screen", false);
            set_overlay_active(&document, "game-over-screen", false);
        }

        /// One animation frame: tick the simulation, dispatch cues, update HUD
        fn frame(&mut self, now_ms: f64) {
            let dt = if self.last_time > 0.0 {
                ((now_ms - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = now_ms;

            let viewport = canvas_viewport(&self.canvas);
            tick(&mut self.state, &self.input, dt, &viewport);

            for event in self.state.drain_events() {
                self.audio.play(event);
            }

            self.update_hud();

            if self.state.phase == GamePhase::GameOver && self.last_phase == GamePhase::Playing {
                self.show_game_over();
            }
            self.last_phase = self.state.phase;
        }

        /// Update HUD text and power-up badges in the DOM
        fn update_hud(&self) {
            let document = document();

            set_text(&document, "score", &self.state.score.to_string());
            set_text(&document, "lives", &self.state.lives.to_string());
            set_text(&document, "level", &self.state.level.to_string());
            set_text(
                &document,
                "time",
                &format!("{}s", self.state.elapsed.floor() as u64),
            );

            // One badge per active power-up with whole seconds remaining
            if let Some(display) = document.get_element_by_id("power-up-display") {
                display.set_inner_html("");
                for (kind, remaining) in self.state.power_ups.iter_active() {
                    if let Ok(badge) = document.create_element("div") {
                        badge.set_class_name(&format!("powerup-badge {}", kind.as_str()));
                        badge.set_text_content(Some(&format!(
                            "{} {}s",
                            kind.as_str().to_uppercase(),
                            remaining.ceil() as u32
                        )));
                        let _ = display.append_child(&badge);
                    }
                }
            }
        }

        fn show_game_over(&self) {
            let document = document();
            set_text(&document, "final-score", &self.state.score.to_string());
            set_text(&document, "final-level", &self.state.level.to_string());
            set_overlay_active(&document, "game-over-screen", true);
        }
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_overlay_active(document: &Document, id: &str, active: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            if active {
                let _ = el.class_list().add_1("active");
            } else {
                let _ = el.class_list().remove_1("active");
            }
        }
    }

    /// The square viewport the simulation sees, from the canvas attributes
    fn canvas_viewport(canvas: &HtmlCanvasElement) -> Viewport {
        Viewport::new(canvas.width() as f32, canvas.height() as f32)
    }

    /// Keep the canvas square at 90% of the smaller window dimension
    fn resize_canvas(canvas: &HtmlCanvasElement) {
        let window = web_sys::window().unwrap();
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        let size = (width.min(height) * 0.9) as u32;
        canvas.set_width(size);
        canvas.set_height(size);
    }

    fn setup_input_listeners(app: Rc<RefCell<App>>) {
        let document = document();

        // Keyboard: arrows or A/D
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut app = app.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "arrowleft" | "a" => app.input.left = true,
                    "arrowright" | "d" => app.input.right = true,
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut app = app.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "arrowleft" | "a" => app.input.left = false,
                    "arrowright" | "d" => app.input.right = false,
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: left half steers left, right half steers right
        let canvas = app.borrow().canvas.clone();
        {
            let app = app.clone();
            let canvas_for_rect = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_for_rect.get_bounding_client_rect();
                    let x = touch.client_x() as f64 - rect.left();
                    let mut app = app.borrow_mut();
                    if x < rect.width() / 2.0 {
                        app.input.left = true;
                    } else {
                        app.input.right = true;
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::TouchEvent| {
                let mut app = app.borrow_mut();
                app.input.left = false;
                app.input.right = false;
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_ui_listeners(app: Rc<RefCell<App>>) {
        let document = document();
        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    app.borrow_mut().start();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            } else {
                log::warn!("missing #{id} button");
            }
        }
    }

    fn setup_resize_listener(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            resize_canvas(&app.borrow().canvas);
        });
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(closure: &Closure<dyn FnMut(f64)>) {
        web_sys::window()
            .unwrap()
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .expect("requestAnimationFrame failed");
    }

    pub fn run() {
        console_log::init_with_level(log::Level::Info).ok();
        console_error_panic_hook::set_once();

        let settings = Settings::load();

        let canvas: HtmlCanvasElement = document()
            .get_element_by_id("game-canvas")
            .expect("missing #game-canvas")
            .dyn_into()
            .expect("#game-canvas is not a canvas");
        resize_canvas(&canvas);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed, canvas, &settings)));
        log::info!("Plane Dodger starting with seed {seed}");

        setup_input_listeners(app.clone());
        setup_ui_listeners(app.clone());
        setup_resize_listener(app.clone());

        // Animation frame loop
        let handle: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let first = handle.clone();
        *first.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
            app.borrow_mut().frame(now_ms);
            request_animation_frame(handle.borrow().as_ref().unwrap());
        }));
        request_animation_frame(first.borrow().as_ref().unwrap());
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use plane_dodger::AudioManager;
    use plane_dodger::sim::{GamePhase, GameState, TickInput, Viewport, tick};

    env_logger::init();
    log::info!("Plane Dodger (native) starting...");

    // Headless demo: sweep the player back and forth for up to two minutes
    // of simulated play at 60fps and report how the run went.
    let viewport = Viewport::new(600.0, 600.0);
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut state = GameState::new(seed, &viewport);
    state.start(&viewport);

    let audio = AudioManager::new();
    let mut input = TickInput::default();
    let dt = 1.0 / 60.0;

    for frame in 0u32..60 * 120 {
        // Change direction every two seconds
        input.left = (frame / 120) % 2 == 0;
        input.right = !input.left;

        tick(&mut state, &input, dt, &viewport);
        for event in state.drain_events() {
            audio.play(event);
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "seed {}: survived {:.1}s, score {}, level {}, lives {}",
        seed, state.elapsed, state.score, state.level, state.lives
    );
}

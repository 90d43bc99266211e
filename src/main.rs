//! Sky Pop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use sky_pop::GameEvent;
    use sky_pop::audio::AudioManager;
    use sky_pop::highscores::HighScores;
    use sky_pop::persistence::{LocalScoreStore, ScoreStore};
    use sky_pop::platform::{clamp_frame_dt, pointer_to_sim};
    use sky_pop::renderer::{CanvasRenderer, FrameSnapshot};
    use sky_pop::settings::Settings;
    use sky_pop::sim::{Difficulty, Engine, GamePhase};

    /// Game instance holding all state
    struct Game {
        engine: Engine,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        scores: HighScores,
        store: LocalScoreStore,
        settings: Settings,
        /// Previous rAF timestamp (ms); 0 until the first frame lands
        last_time: f64,
    }

    impl Game {
        /// One display frame: advance the sim, fan out notifications,
        /// draw the snapshot, refresh the DOM HUD.
        fn frame(&mut self, time_ms: f64) {
            let dt = if self.last_time > 0.0 {
                clamp_frame_dt(((time_ms - self.last_time) / 1000.0) as f32)
            } else {
                0.0
            };
            self.last_time = time_ms;

            self.engine.update(dt);

            for event in self.engine.drain_events() {
                self.audio.handle(&event);
                if let GameEvent::GameOver { score } = event {
                    self.finish_run(score);
                }
            }

            if let Some(renderer) = &self.renderer {
                renderer.render(&FrameSnapshot::capture(&self.engine));
            }
            self.update_hud();
        }

        /// Game-over bookkeeping: push the score to storage and the board
        fn finish_run(&mut self, score: u64) {
            if !self.store.save_score(score) {
                log::warn!("Best score not persisted this session");
            }
            let rank = self
                .scores
                .record(score, self.engine.difficulty, js_sys::Date::now());
            if let Some(rank) = rank {
                log::info!("Run placed #{} on the board", rank);
            }
            self.scores.save();
        }

        fn start(&mut self, difficulty: Difficulty) {
            self.settings.difficulty = difficulty;
            self.settings.save();
            self.engine.start(difficulty);
            self.audio.resume();
        }

        fn toggle_pause(&mut self) {
            match self.engine.phase {
                GamePhase::Running => self.engine.pause(),
                GamePhase::Paused => {
                    self.engine.resume();
                    self.audio.resume();
                }
                _ => {}
            }
        }

        fn pointer(&mut self, client_x: f32, client_y: f32, canvas: &HtmlCanvasElement) {
            let rect = canvas.get_bounding_client_rect();
            let point = pointer_to_sim(
                client_x,
                client_y,
                rect.left() as f32,
                rect.top() as f32,
                rect.width() as f32,
                rect.height() as f32,
            );
            self.engine.handle_input(point);
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.engine.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.engine.high_score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-lives .hud-value").ok().flatten() {
                el.set_text_content(Some(&"❤️".repeat(self.engine.lives as usize)));
            }

            // Combo only reads as a combo from 2 up
            if let Some(el) = document.get_element_by_id("hud-combo") {
                if self.engine.combo > 1 {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-combo .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&format!("x{}", self.engine.combo)));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Active effect badges with remaining time
            if let Some(el) = document.get_element_by_id("hud-effects") {
                let badges: Vec<String> = self
                    .engine
                    .powerups
                    .effects()
                    .iter()
                    .map(|e| format!("{} {:.0}s", e.kind.label(), e.remaining.max(0.0)))
                    .collect();
                el.set_text_content(Some(&badges.join("  ")));
            }

            self.toggle_overlay(&document, "start-screen", self.engine.phase == GamePhase::Idle);
            self.toggle_overlay(&document, "pause-menu", self.engine.phase == GamePhase::Paused);

            let ended = self.engine.phase == GamePhase::Ended;
            self.toggle_overlay(&document, "game-over", ended);
            if ended {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.engine.score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("best-score") {
                    el.set_text_content(Some(&self.engine.high_score.to_string()));
                }
            }
        }

        fn toggle_overlay(&self, document: &web_sys::Document, id: &str, visible: bool) {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "overlay" } else { "overlay hidden" });
            }
        }
    }

    pub fn run() {
        let _ = console_log::init_with_level(log::Level::Info);
        console_error_panic_hook::set_once();

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no #canvas element")
            .dyn_into()
            .expect("#canvas is not a canvas");

        let settings = Settings::load();
        let store = LocalScoreStore::new();

        let seed = js_sys::Date::now() as u64;
        let mut engine = Engine::new(seed);
        engine.high_score = store.fetch_high_score();
        engine.particles.set_max_particles(settings.max_particles());

        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);

        let renderer = CanvasRenderer::new(&canvas, window.device_pixel_ratio());
        if renderer.is_none() {
            log::error!("Canvas 2D context unavailable");
        }

        let game = Rc::new(RefCell::new(Game {
            engine,
            renderer,
            audio,
            scores: HighScores::load(),
            store,
            settings,
            last_time: 0.0,
        }));

        setup_pointer_input(game.clone(), canvas.clone());
        setup_keyboard(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());
        start_frame_loop(game);

        log::info!("Sky Pop ready (seed {})", seed);
    }

    fn setup_pointer_input(game: Rc<RefCell<Game>>, canvas: HtmlCanvasElement) {
        {
            let game = game.clone();
            let canvas_ref = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().pointer(
                    event.client_x() as f32,
                    event.client_y() as f32,
                    &canvas_ref,
                );
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let canvas_ref = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().pointer(
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                        &canvas_ref,
                    );
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            match event.key().as_str() {
                " " | "Escape" | "p" => game.borrow_mut().toggle_pause(),
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for (id, difficulty) in [
            ("start-easy-btn", Difficulty::Easy),
            ("start-medium-btn", Difficulty::Medium),
            ("start-hard-btn", Difficulty::Hard),
        ] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().start(difficulty);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().toggle_pause();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Play again with the same difficulty
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let difficulty = game.borrow().engine.difficulty;
                game.borrow_mut().start(difficulty);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Back to the start screen
        if let Some(btn) = document.get_element_by_id("menu-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().engine.reset();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_ref = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_ref.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.engine.phase == GamePhase::Running {
                        g.engine.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur: pause, and mute if the player asked for that
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.engine.phase == GamePhase::Running {
                    g.engine.pause();
                    log::info!("Auto-paused (window blur)");
                }
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
                game.borrow_mut().audio.set_muted(false);
            });
            let _ = web_sys::window()
                .unwrap()
                .add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn start_frame_loop(game: Rc<RefCell<Game>>) {
        let handle = Rc::new(RefCell::new(None::<Closure<dyn FnMut(f64)>>));
        let starter = handle.clone();

        *starter.borrow_mut() = Some(Closure::new(move |time: f64| {
            game.borrow_mut().frame(time);
            request_animation_frame(handle.borrow().as_ref().unwrap());
        }));
        request_animation_frame(starter.borrow().as_ref().unwrap());
    }

    fn request_animation_frame(closure: &Closure<dyn FnMut(f64)>) {
        web_sys::window()
            .unwrap()
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .expect("requestAnimationFrame failed");
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
    log::info!("Sky Pop (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    demo_session();
}

/// Headless smoke run: tap everything that drifts into the upper half of
/// the screen for twenty simulated seconds and report the tally.
#[cfg(not(target_arch = "wasm32"))]
fn demo_session() {
    use sky_pop::GameEvent;
    use sky_pop::sim::{Difficulty, Engine, GamePhase};

    let mut engine = Engine::new(42);
    engine.start(Difficulty::Medium);

    let dt = 1.0 / 60.0;
    let mut pops = 0u32;
    for _ in 0..(60 * 20) {
        engine.update(dt);

        let target = engine
            .balloons
            .iter()
            .find(|b| b.pos.y < 400.0)
            .map(|b| b.pos);
        if let Some(point) = target {
            engine.handle_input(point);
        }

        for event in engine.drain_events() {
            if matches!(event, GameEvent::BalloonPopped { .. }) {
                pops += 1;
            }
        }

        if engine.phase == GamePhase::Ended {
            break;
        }
    }

    println!(
        "demo: {} pops, score {}, lives left {}",
        pops, engine.score, engine.lives
    );
}

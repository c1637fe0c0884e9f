//! Katana Neon entry point
//!
//! Browser: wires the DOM menu, pointer events and the frame loop to the game.
//! Native: plays one headless run with the autopilot and saves the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, PointerEvent};

    use katana_neon::audio::AudioManager;
    use katana_neon::highscores::format_age;
    use katana_neon::persistence::LocalStorageStore;
    use katana_neon::platform::{BrowserPrompt, now_ms};
    use katana_neon::renderer::CanvasRenderState;
    use katana_neon::sim::{GameEvent, RunPhase, Viewport};
    use katana_neon::{Game, Settings, Tuning};

    /// Browser shell around the game
    struct App {
        game: Game<LocalStorageStore>,
        render_state: CanvasRenderState,
        audio: AudioManager,
        document: Document,
    }

    impl App {
        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let classes = el.class_list();
                let _ = if hidden {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn show_menu(&self) {
            self.set_text("menuHighscore", &self.game.scores().best_label());
            self.set_hidden("scoreboard", true);
            self.set_hidden("menu", false);
        }

        fn show_scores(&self) {
            self.render_scores_list();
            self.set_hidden("menu", true);
            self.set_hidden("scoreboard", false);
        }

        fn render_scores_list(&self) {
            let Some(list) = self.document.get_element_by_id("scoresList") else {
                return;
            };
            list.set_text_content(None);

            let entries = self.game.top_scores();
            if entries.is_empty() {
                append_entry(&self.document, &list, "No scores yet", None);
                return;
            }
            let now = chrono::Utc::now();
            for (i, e) in entries.iter().enumerate() {
                let line = format!("#{} {} - {} pts", i + 1, e.name, e.score);
                append_entry(&self.document, &list, &line, Some(&format_age(e.timestamp, now)));
            }
        }

        fn render_lives(&self, lives: u32) {
            self.set_text("lives", &"\u{2764}".repeat(lives as usize));
        }

        /// Push simulation events to audio and the HUD
        fn handle_events(&mut self) {
            for event in self.game.drain_events() {
                self.audio.on_event(&event);
                match &event {
                    GameEvent::CountdownStep { remaining } => {
                        self.set_hidden("bigTimer", false);
                        self.set_text("bigTimer", &remaining.to_string());
                    }
                    GameEvent::RunStarted => {
                        self.set_hidden("bigTimer", true);
                        self.render_lives(self.game.state.session.lives);
                        self.audio.start_music();
                    }
                    GameEvent::ClockTick { .. } => {
                        let session = &self.game.state.session;
                        let pulse = session.is_final_countdown()
                            && !self.game.settings.reduced_motion;
                        self.set_hidden("bigTimer", !pulse);
                        if pulse {
                            self.set_text("bigTimer", &session.time_remaining.to_string());
                        }
                    }
                    GameEvent::BombDetonated { lives_left, .. } => {
                        self.render_lives(*lives_left);
                    }
                    GameEvent::RunEnded(summary) => {
                        self.audio.stop_music();
                        self.set_hidden("bigTimer", true);
                        if let Some(window) = web_sys::window() {
                            let text = format!("{}\n{}", summary.title(), summary.message());
                            let _ = window.alert_with_message(&text);
                        }
                        self.game.acknowledge();
                        self.show_menu();
                    }
                    GameEvent::Spawned { .. }
                    | GameEvent::SliceCue
                    | GameEvent::Sliced { .. }
                    | GameEvent::Missed { .. } => {}
                }
            }

            if matches!(self.game.state.phase, RunPhase::Running) {
                self.set_text("scoreDisplay", &self.game.state.session.hud_label());
            }
        }

        fn frame(&mut self) {
            self.game.advance(now_ms());
            self.handle_events();
            self.render_state.render(&self.game.state, &self.game.settings);
        }
    }

    fn append_entry(document: &Document, list: &web_sys::Element, line: &str, age: Option<&str>) {
        let Ok(row) = document.create_element("div") else {
            return;
        };
        row.set_class_name("entry");
        row.set_text_content(Some(line));
        if let Some(age) = age {
            if let Ok(small) = document.create_element("div") {
                small.set_class_name("age");
                small.set_text_content(Some(age));
                let _ = row.append_child(&small);
            }
        }
        let _ = list.append_child(&row);
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Katana Neon starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        document
            .get_element_by_id("gameArea")
            .ok_or("no #gameArea")?
            .append_child(&canvas)?;

        let css_w = window.inner_width()?.as_f64().unwrap_or(1280.0);
        let css_h = window.inner_height()?.as_f64().unwrap_or(720.0);
        let mut render_state = CanvasRenderState::new(canvas, window.device_pixel_ratio())?;
        render_state.resize(css_w, css_h);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            seed,
            Tuning::default(),
            Viewport::new(css_w as f32, css_h as f32),
            settings.clone(),
            LocalStorageStore::new(),
        );
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            render_state,
            audio: AudioManager::new(&settings),
            document,
        }));
        app.borrow().show_menu();

        setup_menu_buttons(app.clone());
        setup_pointer_handlers(app.clone());
        setup_resize(app.clone());
        request_animation_frame(app);

        log::info!("Katana Neon running!");
        Ok(())
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut() + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            return;
        };
        let mut handler = handler;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| handler());
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_menu_buttons(app: Rc<RefCell<App>>) {
        let document = app.borrow().document.clone();

        {
            let app = app.clone();
            on_click(&document, "btnPlay", move || {
                let mut a = app.borrow_mut();
                // Click is the user gesture that unlocks audio
                a.audio.unlock();
                a.set_hidden("menu", true);
                if let Err(e) = a.game.play(&mut BrowserPrompt, now_ms) {
                    log::warn!("Start ignored: {}", e);
                }
                a.set_text("scoreDisplay", &a.game.state.session.hud_label());
                a.render_lives(a.game.state.session.lives);
            });
        }
        {
            let app = app.clone();
            on_click(&document, "btnHow", move || {
                let text = app.borrow().game.state.tuning.how_to_play();
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&text);
                }
            });
        }
        {
            let app = app.clone();
            on_click(&document, "btnScores", move || app.borrow().show_scores());
        }
        {
            let app = app.clone();
            on_click(&document, "btnBackFromScores", move || app.borrow().show_menu());
        }
        on_click(&document, "btnClearScores", move || {
            let mut a = app.borrow_mut();
            if let Err(e) = a.game.clear_scores() {
                log::warn!("Failed to clear high scores: {}", e);
            }
            a.render_scores_list();
            a.set_text("menuHighscore", &a.game.scores().best_label());
        });
    }

    fn setup_pointer_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let listeners: [(&str, fn(&mut App, Vec2, f64)); 3] = [
            ("pointerdown", |a, pos, now| a.game.pointer_down(pos, now)),
            ("pointermove", |a, pos, now| a.game.pointer_move(pos, now)),
            ("pointerup", |a, _, _| a.game.pointer_up()),
        ];
        for (name, action) in listeners {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                action(&mut *app.borrow_mut(), pos, now_ms());
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let w = window.inner_width().ok().and_then(|v| v.as_f64());
            let h = window.inner_height().ok().and_then(|v| v.as_f64());
            if let (Some(w), Some(h)) = (w, h) {
                let mut a = app.borrow_mut();
                a.render_state.resize(w, h);
                a.game.resize(w as f32, h as f32);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            app.borrow_mut().frame();
            request_animation_frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use katana_neon::persistence::FileStore;
    use katana_neon::sim::{RunPhase, Viewport};
    use katana_neon::{Game, Settings, Tuning};

    env_logger::init();
    log::info!("Katana Neon (native) starting...");
    log::info!("Interactive play needs the web build; running a headless demo");

    let tuning = match std::env::var("KATANA_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    let store = FileStore::in_dir(std::env::temp_dir());
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(42);
    let mut game = Game::new(
        seed,
        tuning,
        Viewport::new(1280.0, 720.0),
        Settings::default(),
        store,
    );

    let mut bot_name = || Some("Autopilot".to_string());
    if let Err(e) = game.play(&mut bot_name, || 0.0) {
        log::error!("Could not start: {}", e);
        return;
    }

    // Simulated 60 Hz clock
    let mut now = 0.0;
    let mut frames = 0u64;
    while !matches!(game.state.phase, RunPhase::Ended(_)) {
        now += 1000.0 / 60.0;
        frames += 1;
        game.advance(now);
        if frames % 6 == 0 {
            game.autopilot_step(now);
        }
        game.drain_events();
    }

    if let RunPhase::Ended(summary) = &game.state.phase {
        println!("{}", summary.title());
        println!("{}", summary.message());
    }
    println!("\nTop scores ({}):", game.store().path().display());
    for (i, entry) in game.top_scores().iter().enumerate() {
        println!("#{:>2} {:<12} {:>5} pts", i + 1, entry.name, entry.score);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

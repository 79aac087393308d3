//! Dash Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlButtonElement, HtmlCanvasElement, HtmlInputElement, KeyboardEvent};

    use dash_runner::audio::AudioManager;
    use dash_runner::highscores::format_date;
    use dash_runner::renderer::CanvasSurface;
    use dash_runner::settings::normalize_name;
    use dash_runner::sim::{GamePhase, Tuning};
    use dash_runner::{Game, HighScores, LoopControl, LoopToken, Settings};

    const MAX_CANVAS_WIDTH: f64 = 900.0;
    const ASPECT: f64 = 16.0 / 9.0;
    const SCREENS: [&str; 4] = [
        "mainMenu",
        "gameContainer",
        "gameOverScreen",
        "leaderboardScreen",
    ];

    /// Everything the page callbacks share
    struct App {
        game: Game<AudioManager>,
        surface: CanvasSurface,
        settings: Settings,
        highscores: HighScores,
        /// Pending animation frame, cancelled on restart
        raf_id: Option<i32>,
        score_saved: bool,
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show_screen(name: &str) {
        let document = document();
        for id in SCREENS {
            if let Some(el) = document.get_element_by_id(id) {
                if id == name {
                    let _ = el.class_list().add_1("active");
                } else {
                    let _ = el.class_list().remove_1("active");
                }
            }
        }
    }

    /// 16:9 canvas no wider than its container or 900 CSS pixels
    fn set_canvas_size(canvas: &HtmlCanvasElement) {
        let parent_w = canvas
            .parent_element()
            .map(|p| f64::from(p.client_width()))
            .unwrap_or(MAX_CANVAS_WIDTH);
        let css_w = parent_w.min(MAX_CANVAS_WIDTH);
        let css_h = css_w / ASPECT;

        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", css_w));
        let _ = style.set_property("height", &format!("{}px", css_h));
        canvas.set_width(css_w.round() as u32);
        canvas.set_height(css_h.round() as u32);
    }

    fn update_hud(game: &Game<AudioManager>) {
        let hud = game.hud();
        set_text("scoreDisplay", &format!("Score: {}", hud.score));
        set_text("coinsDisplay", &format!("Coins: {}", hud.coins));
        set_text("btnPause", if hud.paused { "▶" } else { "⏸" });
    }

    fn set_save_enabled(enabled: bool) {
        if let Some(btn) = document()
            .get_element_by_id("saveScoreButton")
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        {
            btn.set_disabled(!enabled);
        }
    }

    fn player_name_input() -> Option<HtmlInputElement> {
        document()
            .get_element_by_id("playerNameInput")?
            .dyn_into::<HtmlInputElement>()
            .ok()
    }

    fn on_click(id: &str, mut f: impl FnMut() + 'static) {
        if let Some(el) = document().get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| f());
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dash Runner starting...");

        let document = document();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        set_canvas_size(&canvas);

        let Some(surface) = CanvasSurface::new(canvas.clone()) else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let settings = Settings::load();
        if let Some(input) = player_name_input() {
            input.set_value(&settings.player_name);
        }

        let mut game = Game::new(Tuning::default(), AudioManager::new());
        game.apply_settings(&settings);
        update_sound_button(game.sound_on());

        let app = Rc::new(RefCell::new(App {
            game,
            surface,
            settings,
            highscores: HighScores::load(),
            raf_id: None,
            score_saved: false,
        }));

        setup_resize(canvas);
        setup_buttons(app.clone());
        setup_keyboard(app);

        show_screen("mainMenu");
        log::info!("Dash Runner ready");
    }

    fn setup_resize(canvas: HtmlCanvasElement) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            set_canvas_size(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn start_game(app: &Rc<RefCell<App>>) {
        let token = {
            let mut guard = app.borrow_mut();
            let a = &mut *guard;

            let name = normalize_name(&player_name_input().map(|i| i.value()).unwrap_or_default());
            if let Some(input) = player_name_input() {
                input.set_value(&name);
            }
            a.settings.player_name = name;
            a.settings.save();

            if let Some(id) = a.raf_id.take() {
                let _ = web_sys::window().unwrap().cancel_animation_frame(id);
            }

            show_screen("gameContainer");
            set_canvas_size(a.surface.canvas());
            a.score_saved = false;
            set_save_enabled(true);

            let token = a.game.start(js_sys::Date::now() as u64);
            update_hud(&a.game);
            token
        };
        request_animation_frame(app.clone(), token);
    }

    fn request_animation_frame(app: Rc<RefCell<App>>, token: LoopToken) {
        let window = web_sys::window().unwrap();
        let app_for_frame = app.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(app_for_frame, token, time);
        });
        let id = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
        app.borrow_mut().raf_id = id;
    }

    fn game_loop(app: Rc<RefCell<App>>, token: LoopToken, time: f64) {
        let control = {
            let mut guard = app.borrow_mut();
            let a = &mut *guard;
            a.raf_id = None;
            let control = a.game.frame(token, time, &mut a.surface);
            update_hud(&a.game);
            control
        };

        match control {
            LoopControl::Continue => request_animation_frame(app, token),
            LoopControl::Stop => {
                let a = app.borrow();
                if a.game.phase() == GamePhase::GameOver {
                    if let Some(final_score) = a.game.final_score() {
                        set_text("finalScore", &final_score.to_string());
                    }
                    show_screen("gameOverScreen");
                }
            }
        }
    }

    fn save_score(app: &Rc<RefCell<App>>) {
        let saved = {
            let mut guard = app.borrow_mut();
            let a = &mut *guard;
            match a.game.final_score() {
                Some(score) if !a.score_saved => {
                    let name = a.settings.player_name.clone();
                    let rank = a.highscores.add_score(&name, score, js_sys::Date::now());
                    a.highscores.save();
                    a.score_saved = true;
                    log::info!("Saved score {} for {} (rank {:?})", score, name, rank);
                    true
                }
                _ => false,
            }
        };
        if saved {
            set_save_enabled(false);
            let _ = web_sys::window()
                .unwrap()
                .alert_with_message("Score saved!");
        }
    }

    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
    }

    fn render_leaderboard(app: &Rc<RefCell<App>>) {
        let a = app.borrow();
        let rows = if a.highscores.is_empty() {
            "<tr><td colspan=\"4\">No scores yet.</td></tr>".to_string()
        } else {
            a.highscores
                .entries
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                        i + 1,
                        escape_html(&e.name),
                        e.score,
                        format_date(e.timestamp)
                    )
                })
                .collect()
        };
        if let Some(body) = document().get_element_by_id("leaderboardBody") {
            body.set_inner_html(&rows);
        }
        show_screen("leaderboardScreen");
    }

    fn update_sound_button(sound_on: bool) {
        set_text("btnSound", if sound_on { "🔊" } else { "🔈" });
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        for id in ["startButton", "restartButton"] {
            let app = app.clone();
            on_click(id, move || start_game(&app));
        }

        {
            let app = app.clone();
            on_click("leaderboardButton", move || render_leaderboard(&app));
        }
        for id in ["leaderboardBackButton", "backToMenuFromLB"] {
            on_click(id, || show_screen("mainMenu"));
        }
        {
            let app = app.clone();
            on_click("resetLeaderboardButton", move || {
                let confirmed = web_sys::window()
                    .unwrap()
                    .confirm_with_message("Reset all scores?")
                    .unwrap_or(false);
                if confirmed {
                    app.borrow_mut().highscores.reset();
                    render_leaderboard(&app);
                }
            });
        }
        {
            let app = app.clone();
            on_click("saveScoreButton", move || save_score(&app));
        }
        {
            let app = app.clone();
            on_click("jumpButton", move || {
                app.borrow_mut().game.request_jump();
            });
        }
        {
            let app = app.clone();
            on_click("btnPause", move || {
                let mut guard = app.borrow_mut();
                let a = &mut *guard;
                a.game.toggle_pause();
                update_hud(&a.game);
            });
        }
        {
            let app = app.clone();
            on_click("btnTheme", move || {
                let mut guard = app.borrow_mut();
                let a = &mut *guard;
                a.settings.theme_index = a.game.cycle_theme();
                a.settings.save();
            });
        }
        {
            let app = app.clone();
            on_click("btnSound", move || {
                let mut guard = app.borrow_mut();
                let a = &mut *guard;
                a.settings.sound_on = a.game.toggle_sound();
                a.settings.save();
                update_sound_button(a.settings.sound_on);
            });
        }
        on_click("btnDebug", move || {
            let mut guard = app.borrow_mut();
            let a = &mut *guard;
            a.settings.show_debug = a.game.toggle_debug_overlay();
        });
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut guard = app.borrow_mut();
            let a = &mut *guard;
            match event.code().as_str() {
                "Space" | "ArrowUp" => {
                    event.prevent_default();
                    a.game.request_jump();
                }
                "KeyP" => {
                    a.game.toggle_pause();
                    update_hud(&a.game);
                }
                "KeyD" => {
                    a.settings.show_debug = a.game.toggle_debug_overlay();
                }
                _ => {}
            }
        });
        let _ = document()
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dash Runner (native) starting...");
    log::info!("Running a headless session - use `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Autopiloted session against an in-memory surface
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use dash_runner::audio::SilentAudio;
    use dash_runner::renderer::RecordingSurface;
    use dash_runner::sim::{GameState, Tuning};
    use dash_runner::{Game, HighScores, LoopControl, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after two minutes of simulated play
    const MAX_FRAMES: u32 = 60 * 120;

    /// Optional tuning file passed as the first argument
    fn load_tuning() -> Tuning {
        let Some(path) = std::env::args().nth(1) else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning in {}: {} - using defaults", path, e);
                    Tuning::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {} - using defaults", path, e);
                Tuning::default()
            }
        }
    }

    /// Jump when the nearest obstacle ahead is about to arrive
    fn should_jump(state: &GameState) -> bool {
        let player = state.player.rect();
        let lead = state.speed * 0.2;
        state.obstacles.iter().any(|o| {
            let gap = o.pos.x - player.right();
            gap >= 0.0 && gap < lead
        })
    }

    /// Wall-clock milliseconds since the Unix epoch, like `Date.now()`
    fn unix_millis() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0)
    }

    pub fn run() {
        let seed = unix_millis() as u64;

        let settings = Settings::load();
        let mut game = Game::new(load_tuning(), SilentAudio);
        game.apply_settings(&settings);
        let mut surface = RecordingSurface::new(800.0, 450.0);

        let token = game.start(seed);
        let mut now = 0.0;
        let mut frames = 0;
        while frames < MAX_FRAMES {
            if should_jump(game.state()) {
                game.request_jump();
            }
            let control = game.frame(token, now, &mut surface);
            surface.take_commands();
            if control == LoopControl::Stop {
                break;
            }
            now += FRAME_MS;
            frames += 1;
        }

        let hud = game.hud();
        match game.final_score() {
            Some(final_score) => {
                let mut highscores = HighScores::load();
                let rank = highscores.add_score(&settings.player_name, final_score, unix_millis());
                highscores.save();
                println!(
                    "Game over after {} frames: score {} + {} coins = {} (rank {:?})",
                    frames, hud.score, hud.coins, final_score, rank
                );
            }
            None => println!(
                "Survived {} frames: score {}, {} coins",
                frames, hud.score, hud.coins
            ),
        }
    }

}

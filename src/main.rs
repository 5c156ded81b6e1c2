//! Retro Platformer entry point
//!
//! Handles platform-specific initialization and wires the schedulers to real
//! timers: requestAnimationFrame + setInterval in the browser, a scripted
//! headless loop natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent, TouchEvent};

    use retro_platformer::Settings;
    use retro_platformer::TransitionError;
    use retro_platformer::platform::{Command, HeldKeys, command_for_key};
    use retro_platformer::renderer::{Renderer, snapshot_json};
    use retro_platformer::sim::{Game, GameEvent, GamePhase, GameState, TimerHandle};

    // Page-side hooks: the page draws the canvas and owns the overlays
    #[wasm_bindgen(inline_js = "
        export function draw_frame(snapshot) {
            if (window.drawFrame) {
                window.drawFrame(JSON.parse(snapshot));
            }
        }

        export function notify_ui(event) {
            if (window.onGameEvent) {
                window.onGameEvent(JSON.parse(event));
            }
        }

        export function settings_override() {
            return window.PLATFORMER_SETTINGS
                ? JSON.stringify(window.PLATFORMER_SETTINGS)
                : undefined;
        }
    ")]
    extern "C" {
        fn draw_frame(snapshot: &str);
        fn notify_ui(event: &str);
        fn settings_override() -> Option<String>;
    }

    /// Hands each frame's snapshot to the page's canvas code
    struct CanvasRenderer;

    impl Renderer for CanvasRenderer {
        fn draw(&mut self, state: &GameState) {
            match snapshot_json(state) {
                Ok(json) => draw_frame(&json),
                Err(e) => log::warn!("Snapshot failed: {e}"),
            }
        }
    }

    /// Everything the browser callbacks share
    struct Driver {
        game: Game,
        keys: HeldKeys,
        renderer: CanvasRenderer,
        /// Live setInterval ids by countdown handle
        intervals: HashMap<TimerHandle, i32>,
        joystick_center: Vec2,
    }

    type Shared = Rc<RefCell<Driver>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Retro Platformer starting...");

        let settings = Settings::from_json_or_default(settings_override().as_deref());
        let game = match Game::new(settings) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Cannot load level data: {e}");
                return;
            }
        };

        let driver = Rc::new(RefCell::new(Driver {
            game,
            keys: HeldKeys::new(),
            renderer: CanvasRenderer,
            intervals: HashMap::new(),
            joystick_center: Vec2::ZERO,
        }));

        setup_keyboard(driver.clone());
        setup_buttons(driver.clone());
        setup_touch_controls(driver.clone());

        // Draw the world behind the start screen
        {
            let mut d = driver.borrow_mut();
            let Driver { game, renderer, .. } = &mut *d;
            renderer.draw(game.state());
        }
        sync(&driver);

        log::info!("Retro Platformer ready");
    }

    /// Run a driver-requested transition, then reconcile timers and the UI
    fn transition(driver: &Shared, action: impl FnOnce(&mut Game) -> Result<(), TransitionError>) {
        let result = action(&mut driver.borrow_mut().game);
        if let Err(e) = result {
            log::warn!("{e}");
        }
        sync(driver);
    }

    /// Forward queued events to the page and start/stop real timers to match
    fn sync(driver: &Shared) {
        let (events, frame) = {
            let mut d = driver.borrow_mut();
            (d.game.drain_events(), d.game.take_frame_request())
        };

        for event in &events {
            match event {
                GameEvent::CountdownStarted(handle) => start_interval(driver, *handle),
                GameEvent::CountdownStopped(handle) => stop_interval(driver, *handle),
                _ => {}
            }
            match serde_json::to_string(event) {
                Ok(json) => notify_ui(&json),
                Err(e) => log::warn!("Event encode failed: {e}"),
            }
        }

        if let Some(handle) = frame {
            request_frame(driver.clone(), handle);
        }
    }

    fn start_interval(driver: &Shared, handle: TimerHandle) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let d = driver.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            d.borrow_mut().game.countdown_fired(handle);
            sync(&d);
        });
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            1000,
        ) {
            Ok(id) => {
                driver.borrow_mut().intervals.insert(handle, id);
            }
            Err(e) => log::error!("setInterval failed: {e:?}"),
        }
        closure.forget();
    }

    fn stop_interval(driver: &Shared, handle: TimerHandle) {
        let id = driver.borrow_mut().intervals.remove(&handle);
        if let (Some(id), Some(window)) = (id, web_sys::window()) {
            window.clear_interval_with_handle(id);
        }
    }

    fn request_frame(driver: Shared, handle: TimerHandle) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            let rearm = {
                let mut d = driver.borrow_mut();
                let input = d.keys.tick_input();
                let rearm = d.game.frame(handle, &input);
                let Driver { game, renderer, .. } = &mut *d;
                renderer.draw(game.state());
                rearm
            };
            sync(&driver);
            if rearm {
                request_frame(driver, handle);
            }
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(driver: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                driver.borrow_mut().keys.set(&key, true);

                if command_for_key(&key) == Some(Command::Pause) {
                    let playing = driver.borrow().game.phase() == GamePhase::Playing;
                    if playing {
                        transition(&driver, Game::pause);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                driver.borrow_mut().keys.set(&event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key-up events are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                driver.borrow_mut().keys.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(driver: Shared) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let bindings: [(&str, fn(&mut Game) -> Result<(), TransitionError>); 5] = [
            ("start-btn", Game::start_game),
            ("restart-btn", Game::restart_game),
            ("pause-restart-btn", Game::restart_game),
            ("resume-btn", Game::resume),
            ("next-level-btn", Game::next_level),
        ];

        for (id, action) in bindings {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Button #{id} not found");
                continue;
            };
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                transition(&driver, action);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_controls(driver: Shared) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(base) = document.query_selector(".joystick-base").ok().flatten() else {
            log::info!("No joystick on this page");
            return;
        };
        let stick = document.get_element_by_id("joystick-stick");

        // Touch start: remember the base center
        {
            let driver = driver.clone();
            let base_clone = base.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let rect = base_clone.get_bounding_client_rect();
                driver.borrow_mut().joystick_center = Vec2::new(
                    (rect.left() + rect.width() / 2.0) as f32,
                    (rect.top() + rect.height() / 2.0) as f32,
                );
            });
            let _ = base.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move: same logical keys as the arrows
        {
            let driver = driver.clone();
            let stick = stick.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let knob = {
                    let mut d = driver.borrow_mut();
                    let delta = Vec2::new(touch.client_x() as f32, touch.client_y() as f32)
                        - d.joystick_center;
                    d.keys.apply_joystick(delta)
                };
                if let Some(stick) = &stick {
                    let _ = stick.set_attribute(
                        "style",
                        &format!("transform: translate({}px, {}px)", knob.x, knob.y),
                    );
                }
            });
            let _ = base.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end/cancel: release
        for kind in ["touchend", "touchcancel"] {
            let driver = driver.clone();
            let stick = stick.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                driver.borrow_mut().keys.release_joystick();
                if let Some(stick) = &stick {
                    let _ = stick.set_attribute("style", "transform: translate(0px, 0px)");
                }
            });
            let _ = base.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Jump button
        if let Some(btn) = document.get_element_by_id("btn-jump") {
            for (kind, held) in [("touchstart", true), ("touchend", false), ("touchcancel", false)] {
                let driver = driver.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    driver.borrow_mut().keys.set_jump_button(held);
                });
                let _ = btn.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
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
    log::info!("Retro Platformer (native) starting...");
    log::info!("Native mode runs a scripted headless session; serve the wasm build to play");

    // Optional settings override document as the first argument
    let overrides = std::env::args()
        .nth(1)
        .and_then(|path| match std::fs::read_to_string(&path) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("Cannot read settings {path}: {e}");
                None
            }
        });
    let settings = retro_platformer::Settings::from_json_or_default(overrides.as_deref());

    if let Err(e) = headless::run(settings) {
        log::error!("Headless run failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use retro_platformer::Settings;
    use retro_platformer::platform::HeldKeys;
    use retro_platformer::platform::input::{KEY_JUMP, KEY_RIGHT};
    use retro_platformer::renderer::{Renderer, TraceRenderer};
    use retro_platformer::sim::{Game, GamePhase};

    /// Nominal display rate for the scripted session
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Two minutes of frames
    const MAX_FRAMES: u32 = 60 * 120;
    /// Levels to clear before stopping
    const MAX_LEVELS: u32 = 3;

    /// Run right and hop periodically until the run ends or the budget is spent
    pub fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
        let mut game = Game::new(settings)?;
        let mut keys = HeldKeys::new();
        let mut renderer = TraceRenderer::default();
        let mut cleared = 0;

        game.start_game()?;
        let mut chain = game.take_frame_request();

        for frame_no in 0..MAX_FRAMES {
            let Some(handle) = chain else {
                break;
            };

            keys.set(KEY_RIGHT, true);
            keys.set(KEY_JUMP, frame_no % 40 < 2);

            let rearm = game.frame(handle, &keys.tick_input());
            renderer.draw(game.state());
            game.advance_clock(FRAME_DT);
            chain = rearm.then_some(handle);

            for event in game.drain_events() {
                log::debug!("{event:?}");
            }

            match game.phase() {
                GamePhase::LevelComplete => {
                    cleared += 1;
                    if let Some(summary) = game.last_summary() {
                        log::info!(
                            "Cleared level {}: {} + {} bonus",
                            summary.level,
                            summary.score_before_bonus,
                            summary.time_bonus
                        );
                    }
                    if cleared >= MAX_LEVELS {
                        break;
                    }
                    game.next_level()?;
                    chain = game.take_frame_request();
                }
                GamePhase::GameOver => break,
                _ => {}
            }
        }

        let state = game.state();
        log::info!(
            "Session over after {} frames: {:?}, level {}, score {}, lives {}",
            renderer.frames(),
            state.phase,
            state.level,
            state.score,
            state.lives
        );
        Ok(())
    }
}

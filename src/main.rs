//! Showdown Shores entry point
//!
//! On the web this wires DOM events and the lobby buttons to a [`Session`]
//! and drives it from `requestAnimationFrame`. Natively it plays one scripted
//! match on a virtual clock and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent,
        TouchEvent,
    };

    use showdown_shores::platform::DomHud;
    use showdown_shores::renderer::CanvasPainter;
    use showdown_shores::sim::{InputEvent, Key};
    use showdown_shores::{FrameStatus, Session, Settings};

    const CANVAS_ID: &str = "gameCanvas";
    const GAME_SCREEN_ID: &str = "gameScreen";
    const READY_BUTTON_ID: &str = "readyBtn";
    const EXIT_BUTTON_ID: &str = "exitGame";

    /// Game instance: the session plus the surface it paints on
    struct Game {
        session: Session<DomHud>,
        painter: CanvasPainter,
        chrome_height: f64,
    }

    impl Game {
        /// Size the canvas to the viewport minus page chrome
        fn fit_canvas(&mut self) {
            let window = web_sys::window().unwrap();
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0)
                .max(0.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .map(|h| (h - self.chrome_height).max(0.0))
                .unwrap_or(0.0);
            self.painter.resize(width as u32, height as u32);
            self.session.resize(width as f32, height as f32);
        }

        fn paint(&self) {
            self.painter.paint(&self.session.render());
        }

        /// Position of a client-space point on the canvas
        fn canvas_point(&self, client_x: i32, client_y: i32) -> Vec2 {
            let rect = self.painter.canvas().get_bounding_client_rect();
            Vec2::new(
                client_x as f32 - rect.left() as f32,
                client_y as f32 - rect.top() as f32,
            )
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Showdown Shores starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let painter = CanvasPainter::new(canvas.clone()).expect("no 2d context");

        let settings = Settings::load();
        let chrome_height = settings.chrome_height as f64;
        let seed = js_sys::Date::now() as u64;
        let hud = DomHud::new(window.clone(), document.clone());
        let session = Session::new(settings, Vec2::ZERO, seed, hud);

        let game = Rc::new(RefCell::new(Game {
            session,
            painter,
            chrome_height,
        }));
        game.borrow_mut().fit_canvas();

        setup_resize_handler(game.clone());
        setup_input_handlers(&canvas, game.clone());
        setup_lobby_buttons(game);

        log::info!("Showdown Shores ready");
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().fit_canvas();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    if key == Key::Attack {
                        event.prevent_default();
                    }
                    game.borrow_mut()
                        .session
                        .handle_input(InputEvent::KeyDown(key));
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    game.borrow_mut().session.handle_input(InputEvent::KeyUp(key));
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let point = g.canvas_point(event.client_x(), event.client_y());
                g.session.handle_input(InputEvent::PointerMove(point));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().session.handle_input(InputEvent::Click);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch: non-passive so the page does not scroll under the joystick
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let point = g.canvas_point(touch.client_x(), touch.client_y());
                    g.session.handle_input(InputEvent::TouchStart(point));
                }
            });
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let point = g.canvas_point(touch.client_x(), touch.client_y());
                    g.session.handle_input(InputEvent::TouchMove(point));
                }
            });
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().session.handle_input(InputEvent::TouchEnd);
            });
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchend",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn setup_lobby_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        match document.get_element_by_id(READY_BUTTON_ID) {
            Some(btn) => {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    set_game_screen_active(true);
                    let generation = {
                        let mut g = game.borrow_mut();
                        g.fit_canvas();
                        g.session.start(now());
                        g.session.generation()
                    };
                    request_animation_frame(game.clone(), generation);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
            None => log::warn!("#{} not found; matches cannot be started", READY_BUTTON_ID),
        }

        match document.get_element_by_id(EXIT_BUTTON_ID) {
            Some(btn) => {
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    set_game_screen_active(false);
                    game.borrow_mut().session.stop();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
            None => log::warn!("#{} not found; matches cannot be exited", EXIT_BUTTON_ID),
        }
    }

    fn set_game_screen_active(active: bool) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(screen) = document.get_element_by_id(GAME_SCREEN_ID) {
            let classes = screen.class_list();
            let _ = if active {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };
        }
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, generation: u64) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, generation, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, generation: u64, time: f64) {
        let status = {
            let mut g = game.borrow_mut();
            // A newer match owns the loop now
            if g.session.generation() != generation {
                return;
            }
            let status = g.session.frame(time);
            g.paint();
            status
        };

        match status {
            FrameStatus::Running => request_animation_frame(game, generation),
            FrameStatus::Stopped => {}
            FrameStatus::Ended(_) => exit_to_lobby(),
        }
    }

    /// Leave the match through the lobby's own exit button
    fn exit_to_lobby() {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document
            .get_element_by_id(EXIT_BUTTON_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            btn.click();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use showdown_shores::Settings;

    env_logger::init();
    log::info!("Showdown Shores (native) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load_file(Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    match demo::run(settings, seed) {
        Some(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Failed to encode report: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            log::error!("Match stopped without a result");
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless match on a virtual 60 Hz clock
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use showdown_shores::consts::FRAME_MS;
    use showdown_shores::sim::{InputEvent, Key};
    use showdown_shores::{FrameStatus, GameOverReport, LogHud, Session, Settings};

    const ARENA: Vec2 = Vec2::new(800.0, 600.0);
    /// Frames spent strafing in one direction before turning around
    const STRAFE_FRAMES: u64 = 90;

    pub fn run(settings: Settings, seed: u64) -> Option<GameOverReport> {
        let mut session = Session::new(settings, ARENA, seed, LogHud::default());
        session.start(0.0);

        let mut frame: u64 = 0;
        loop {
            steer(&mut session, frame);
            frame += 1;
            match session.frame(frame as f64 * FRAME_MS) {
                FrameStatus::Running => {}
                FrameStatus::Ended(report) => return Some(report),
                FrameStatus::Stopped => return session.report(),
            }
        }
    }

    /// Strafe left and right, and keep firing at the nearest live enemy
    fn steer(session: &mut Session<LogHud>, frame: u64) {
        if frame % STRAFE_FRAMES == 0 {
            let (release, press) = if (frame / STRAFE_FRAMES) % 2 == 0 {
                (Key::Right, Key::Left)
            } else {
                (Key::Left, Key::Right)
            };
            session.handle_input(InputEvent::KeyUp(release));
            session.handle_input(InputEvent::KeyDown(press));
        }

        let player = session.state().player.pos;
        let target = session
            .state()
            .enemies
            .iter()
            .filter(|e| e.is_alive())
            .map(|e| e.pos)
            .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)));
        if let Some(target) = target {
            session.handle_input(InputEvent::PointerMove(target));
            session.handle_input(InputEvent::Click);
        }
    }

}

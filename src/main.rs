//! Jump Action entry point
//!
//! Natively this runs headless sessions driven by the autopilot and prints
//! each run's result as JSON. On the web it drives the game from
//! `requestAnimationFrame` and draws to a 2D canvas.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use jump_action::audio::WebAudio;
    use jump_action::highscores::LocalStorageStore;
    use jump_action::platform::{PointerTracker, Viewport};
    use jump_action::renderer::CanvasRenderer;
    use jump_action::sim::RunResult;
    use jump_action::{AfterRun, Session, StageConfig};

    type WebSession = Session<LocalStorageStore, WebAudio, fn(&RunResult) -> AfterRun>;

    /// Game instance holding all state
    struct Game {
        session: WebSession,
        renderer: CanvasRenderer,
        pointer: PointerTracker,
        viewport: Viewport,
        last_time: Option<f64>,
    }

    impl Game {
        fn update(&mut self, time: f64) {
            // First frame has no delta; the tick ignores zero
            let dt = self
                .last_time
                .map(|last| ((time - last) / 1000.0) as f32)
                .unwrap_or(0.0);
            self.last_time = Some(time);

            let input = self.pointer.snapshot(&self.viewport);
            self.session.frame(&input, dt);
        }

        fn render(&mut self) {
            self.session.draw(&mut self.renderer);
        }

        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let client_w = canvas.client_width() as f32;
            let client_h = canvas.client_height() as f32;
            if self.viewport.screen.x != client_w || self.viewport.screen.y != client_h {
                let dpr = web_sys::window()
                    .map(|w| w.device_pixel_ratio())
                    .unwrap_or(1.0) as f32;
                canvas.set_width((client_w * dpr) as u32);
                canvas.set_height((client_h * dpr) as u32);
                self.viewport.resize(client_w, client_h);
                self.renderer.resize(canvas.width(), canvas.height());
            }
        }
    }

    fn report_run(result: &RunResult) -> AfterRun {
        log::info!(
            "Run over ({:?}): score {}, best {}",
            result.cause,
            result.score,
            result.best_score
        );
        AfterRun::NewRun
    }

    pub fn run() -> Result<(), JsValue> {
        jump_action::logging::init(false);
        log::info!("Jump Action starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        // Backing store at device resolution
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        canvas.set_width((client_w as f64 * dpr) as u32);
        canvas.set_height((client_h as f64 * dpr) as u32);

        let seed = js_sys::Date::now() as u64;
        log::info!("Seeding stage with {}", seed);
        let session = Session::new(
            StageConfig::default(),
            Some(Pcg32::seed_from_u64(seed)),
            LocalStorageStore::new("jump_action"),
            WebAudio::new(),
            report_run as fn(&RunResult) -> AfterRun,
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer: CanvasRenderer::new(&canvas, "assets")?,
            pointer: PointerTracker::new(),
            viewport: Viewport::gui(client_w as f32, client_h as f32),
            last_time: None,
        }));

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(canvas, game);
        log::info!("Jump Action running!");
        Ok(())
    }

    fn touch_position(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<(f32, f32)> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some((
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        ))
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .pointer
                    .press(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move (only matters while held)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .pointer
                    .moved(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up / leave
        for name in ["mouseup", "mouseleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().pointer.release();
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((x, y)) = touch_position(&canvas_clone, &event) {
                    game.borrow_mut().pointer.press(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((x, y)) = touch_position(&canvas_clone, &event) {
                    game.borrow_mut().pointer.moved(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if event.touches().length() == 0 {
                    game.borrow_mut().pointer.release();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| game_loop(canvas, game, time));
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.resize(&canvas);
            g.update(time);
            g.render();
        }
        request_animation_frame(canvas, game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use jump_action::audio::NullAudio;
    use jump_action::highscores::{JsonFileStore, MemoryStore, ScoreStore};
    use jump_action::platform::steer;
    use jump_action::sim::RunResult;
    use jump_action::{AfterRun, Session, StageConfig};

    /// A vertical jump game, played headless by a simple autopilot
    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    pub struct Args {
        /// Stage seed (random when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// JSON file overriding stage parameters
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Best-score file; scores stay in memory when omitted
        #[arg(long)]
        store: Option<PathBuf>,

        /// Give up after this many frames
        #[arg(short, long, default_value_t = 60 * 60 * 5)]
        frames: u32,

        /// Runs to play before stopping
        #[arg(short, long, default_value_t = 1)]
        runs: u32,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    }

    const FRAME_DT: f32 = 1.0 / 60.0;

    pub fn main() -> anyhow::Result<()> {
        let args = Args::parse();
        jump_action::logging::init(args.verbose);

        let config = match &args.config {
            Some(path) => StageConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => StageConfig::default(),
        };

        match &args.store {
            Some(path) => {
                let store = JsonFileStore::open(path)
                    .with_context(|| format!("opening score file {}", path.display()))?;
                play(&args, config, store)
            }
            None => play(&args, config, MemoryStore::new()),
        }
    }

    fn play<S: ScoreStore>(args: &Args, config: StageConfig, store: S) -> anyhow::Result<()> {
        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!("Seeding stage with {}", seed);

        let runs = args.runs.max(1);
        let mut played = 0;
        let reporter = move |result: &RunResult| {
            played += 1;
            match serde_json::to_string(result) {
                Ok(json) => println!("{}", json),
                Err(e) => log::error!("Failed to encode result: {}", e),
            }
            if played >= runs {
                AfterRun::Stop
            } else {
                AfterRun::NewRun
            }
        };

        let mut session = Session::new(
            config,
            Some(Pcg32::seed_from_u64(seed)),
            store,
            NullAudio,
            reporter,
        )?;

        for _ in 0..args.frames {
            if session.is_finished() {
                break;
            }
            let input = steer(session.state());
            session.frame(&input, FRAME_DT);
        }

        if !session.is_finished() {
            log::warn!(
                "Frame limit {} reached mid-run (score {})",
                args.frames,
                session.state().score()
            );
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    headless::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

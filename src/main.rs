//! Unicorn Catch entry point
//!
//! Native: headless autopilot demo that prints the final snapshot as JSON.
//! Web: exports the session commands to the page via wasm-bindgen.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use unicorn_catch::movement::Direction;
    use unicorn_catch::sim::GameEvent;
    use unicorn_catch::{HighScores, Session};

    /// Session handle owned by the page
    #[wasm_bindgen]
    pub struct WebGame {
        session: Session,
        /// Page clock (ms) that maps to session time 0
        epoch_ms: f64,
    }

    #[wasm_bindgen]
    impl WebGame {
        #[wasm_bindgen(constructor)]
        pub fn new(now_ms: f64) -> WebGame {
            let seed = js_sys::Date::now() as u64;
            log::info!("Game initialized with seed: {}", seed);
            WebGame {
                session: Session::with_high_scores(seed, HighScores::load()),
                epoch_ms: now_ms,
            }
        }

        pub fn start(&mut self) {
            self.session.start();
        }

        pub fn restart(&mut self) {
            self.session.restart();
        }

        #[wasm_bindgen(js_name = requestMoveLeft)]
        pub fn request_move_left(&mut self) {
            self.session.request_move_left();
        }

        #[wasm_bindgen(js_name = requestMoveRight)]
        pub fn request_move_right(&mut self) {
            self.session.request_move_right();
        }

        #[wasm_bindgen(js_name = requestStopMoving)]
        pub fn request_stop_moving(&mut self) {
            self.session.request_stop_moving();
        }

        /// Keyboard tap without a hold
        pub fn nudge(&mut self, left: bool) {
            let direction = if left { Direction::Left } else { Direction::Right };
            self.session.nudge(direction);
        }

        /// Run every timer due by the page clock `now_ms`
        pub fn update(&mut self, now_ms: f64) {
            let elapsed = (now_ms - self.epoch_ms).max(0.0) as u64;
            self.session.advance_to(elapsed);

            let game_over = self
                .session
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }));
            if game_over {
                self.session.high_scores().save();
            }
        }

        /// Current frame as JSON
        pub fn snapshot(&self) -> String {
            match self.session.snapshot().to_json() {
                Ok(json) => json,
                Err(e) => {
                    log::error!("Snapshot serialization failed: {}", e);
                    String::from("{}")
                }
            }
        }

        #[wasm_bindgen(js_name = topScore)]
        pub fn top_score(&self) -> f64 {
            self.session.high_scores().top_score().unwrap_or(0) as f64
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Unicorn Catch starting...");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::init();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Longest demo run (simulated ms)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_LIMIT_MS: u64 = 10 * 60 * 1000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use unicorn_catch::consts::SIM_TICK_MS;
    use unicorn_catch::sim::GameEvent;
    use unicorn_catch::{Session, autopilot};

    env_logger::init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring non-numeric seed {:?}", arg);
            1
        }),
        None => 1,
    };
    log::info!("Unicorn Catch (native demo) starting with seed {}", seed);

    let mut session = Session::new(seed);
    session.start();
    while !session.is_over() && session.now_ms() < DEMO_LIMIT_MS {
        autopilot::steer(&mut session);
        session.advance(SIM_TICK_MS);
        for event in session.take_events() {
            if let GameEvent::LifeLost { lives } = event {
                log::info!("Life lost at {}ms, {} left", session.now_ms(), lives);
            }
        }
    }

    log::info!(
        "Demo finished at {}ms: score {}, lives {}",
        session.now_ms(),
        session.state().score,
        session.state().lives
    );
    match session.snapshot().to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Snapshot serialization failed: {}", e),
    }
}

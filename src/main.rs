//! Space Up entry point
//!
//! Headless native run: drives the simulation with a fixed-timestep
//! accumulator and a simple dodging autopilot, logging what happens.
//!
//! Usage: `space-up [seed] [tuning.json]`

use space_up::Tuning;
use space_up::consts::*;
use space_up::sim::{CometKind, GameEvent, GamePhase, GameState, TickInput, tick};

/// Frame rate the headless loop pretends to render at
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after this many seconds of play
const MAX_RUN_SECONDS: f32 = 120.0;

/// Game instance holding all state
struct Game {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    explosions: u32,
    awards: u32,
}

impl Game {
    fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            accumulator: 0.0,
            input: TickInput::default(),
            explosions: 0,
            awards: 0,
        }
    }

    /// Steer away from the nearest threatening comet, toward awards
    fn autopilot(&mut self) {
        let player = self.state.player.pos;
        let threat = self
            .state
            .emitter
            .comets()
            .iter()
            .filter(|c| c.is_enabled() && c.pos.y > player.y)
            .min_by(|a, b| {
                (a.pos - player)
                    .length()
                    .partial_cmp(&(b.pos - player).length())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        self.input.target_x = threat.map(|comet| {
            if comet.kind() == CometKind::Award {
                comet.pos.x
            } else if comet.pos.x >= player.x {
                comet.pos.x - comet.collision_radius() * 3.0
            } else {
                comet.pos.x + comet.collision_radius() * 3.0
            }
        });
    }

    /// Run simulation ticks for one rendered frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.autopilot();
            for event in tick(&mut self.state, &self.input, SIM_DT) {
                self.handle_event(event);
            }
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.pause = false;
        }
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::CometLaunched { id, kind } => {
                log::debug!("Comet {} launched ({})", id, kind.as_str());
            }
            GameEvent::CometExploded { id, kind, pos } => {
                self.explosions += 1;
                log::info!("Comet {} ({}) exploded at ({:.0}, {:.0})", id, kind.as_str(), pos.x, pos.y);
            }
            GameEvent::AwardCollected { id, bonus } => {
                self.awards += 1;
                log::info!("Award {} collected (+{})", id, bonus);
            }
            GameEvent::CometRemoved { id } => log::debug!("Comet {} removed", id),
            GameEvent::EffectFinished { id, kind } => log::debug!("Effect {} ({:?}) finished", id, kind),
            GameEvent::GameOver { score } => log::info!("Game over, score {}", score),
        }
    }

    fn finished(&self) -> bool {
        self.state.phase == GamePhase::GameOver && self.state.effects.is_empty()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED_C0DE);
    let tuning = match args.next() {
        Some(path) => Tuning::load(path),
        None => Tuning::default(),
    };

    log::info!("Space Up (headless) starting with seed {}", seed);
    let mut game = Game::new(seed, tuning);

    let mut frames = 0u32;
    while !game.finished() && game.state.elapsed < MAX_RUN_SECONDS {
        game.update(FRAME_DT);
        frames += 1;
    }

    log::info!(
        "Run ended after {} frames ({:.1}s): score {}, {} explosions, {} awards",
        frames,
        game.state.elapsed,
        game.state.score,
        game.explosions,
        game.awards
    );
    println!("score {}", game.state.score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is driven by the host page
}

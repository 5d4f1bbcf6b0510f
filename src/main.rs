//! Hoop Arena entry point
//!
//! Native builds run a headless demo match: a seeded script plays the human
//! seat through the same key events a browser would send, and the final
//! result is printed as JSON. The browser build enters through
//! `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;
    use std::sync::Arc;

    use clap::Parser;
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use hoop_arena::consts::*;
    use hoop_arena::platform::{key_down, key_up};
    use hoop_arena::sim::{InputSampler, MatchStatus, Seats, Snapshot};
    use hoop_arena::{Arena, GameMode, SessionHandle, Settings};

    #[derive(Parser, Debug)]
    #[command(name = "hoop-arena", about = "Run a headless Hoop Arena match")]
    struct Cli {
        /// Match length in seconds (overrides the settings file)
        #[arg(long)]
        seconds: Option<u32>,
        /// Seed for the scripted input
        #[arg(long, default_value_t = 7)]
        seed: u64,
        /// Game mode: 1v1, 3v3 or online
        #[arg(long, default_value = "1v1")]
        mode: GameMode,
        /// JSON settings file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// User id for the session
        #[arg(long, default_value = "demo")]
        user: String,
        /// Put the bot in both seats
        #[arg(long)]
        bots: bool,
    }

    /// Keys the script can hold: one per direction
    const DIRECTION_KEYS: [&str; 4] = ["w", "a", "s", "d"];
    /// Ticks between script decisions
    const DECISION_TICKS: u64 = 20;

    /// Plays the human seat by pressing and releasing keys
    struct InputScript {
        rng: Pcg32,
        held: Vec<&'static str>,
    }

    impl InputScript {
        fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed),
                held: Vec::new(),
            }
        }

        fn drive(&mut self, input: &InputSampler, snapshot: &Snapshot) {
            // Shoot whenever the ball is within reach
            let reach = snapshot.player_one.pos.distance(snapshot.ball.pos);
            if reach < CONTACT_RADIUS {
                key_down(input, " ");
            } else {
                key_up(input, " ");
            }

            if snapshot.tick % DECISION_TICKS != 0 {
                return;
            }
            for key in self.held.drain(..) {
                key_up(input, key);
            }

            // Mostly chase the ball, sometimes wander
            let to_ball = snapshot.ball.pos - snapshot.player_one.pos;
            let chase = self.rng.random_bool(0.75);
            for (key, dir) in DIRECTION_KEYS.into_iter().zip([
                Vec2::NEG_Y,
                Vec2::NEG_X,
                Vec2::Y,
                Vec2::X,
            ]) {
                let press = if chase {
                    to_ball.dot(dir) > CONTACT_RADIUS / 2.0
                } else {
                    self.rng.random_bool(0.3)
                };
                if press {
                    key_down(input, key);
                    self.held.push(key);
                }
            }
        }
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        let cli = Cli::parse();
        log::info!("Hoop Arena (native) starting...");

        let mut settings = match &cli.settings {
            Some(path) => match Settings::load(path) {
                Ok(settings) => settings,
                Err(e) => {
                    log::error!("{e}");
                    return ExitCode::FAILURE;
                }
            },
            None => Settings::default(),
        };
        settings.mode = cli.mode;
        if let Some(seconds) = cli.seconds {
            settings.tuning.match_seconds = seconds;
        }

        let input = Arc::new(InputSampler::new());
        let mut arena = match Arena::open(
            Some(SessionHandle::new(cli.user.clone())),
            settings,
            Arc::clone(&input),
        ) {
            Ok(arena) => arena,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        };
        if cli.bots {
            let seats = Seats::bot_vs_bot(arena.tuning());
            arena.set_seats(seats);
        }

        let mut script = InputScript::new(cli.seed);
        arena.start();
        while arena.status() != MatchStatus::Finished {
            if !cli.bots {
                script.drive(&input, &arena.snapshot());
            }
            arena.step();
        }

        let Some(result) = arena.result() else {
            return ExitCode::FAILURE;
        };
        let snapshot = arena.snapshot();
        log::info!(
            "Final positions: ball ({:.1}, {:.1}), player one ({:.1}, {:.1})",
            snapshot.ball.pos.x,
            snapshot.ball.pos.y,
            snapshot.player_one.pos.x,
            snapshot.player_one.pos.y
        );
        match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to encode result: {e}");
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::init, this is just to satisfy the compiler
}

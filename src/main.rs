//! Headless runner
//!
//! `toroids [seed] [ticks] [settings.json] [quality]` flies the autopilot through a
//! seeded game and prints a summary. Useful for soak-testing the physics
//! core without a window.

use toroids::{QualityPreset, Settings};
use toroids::consts::{MAX_SUBSTEPS, SIM_DT};
use toroids::render::{CommandList, draw_world};
use toroids::sim::{GameEvent, GamePhase, SimRng, TickInput, World, tick};

const DEFAULT_SEED: u64 = 12345;
const DEFAULT_TICKS: u64 = 60 * 60;

/// Game instance holding all state
struct Game {
    world: World,
    rng: SimRng,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    fn new(seed: u64, settings: Settings) -> Self {
        let mut rng = SimRng::new(seed);
        let world = World::new(settings, &mut rng);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            world,
            rng,
            accumulator: 0.0,
            input: TickInput {
                idle_mode: true,
                ..Default::default()
            },
        }
    }

    /// Run simulation ticks for `dt` seconds of frame time
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;
        self.input.dt_ms = dt * 1000.0;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.world, &self.input, &mut self.rng);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in self.world.drain_events() {
            match event {
                GameEvent::ScoreIncreased { .. } => {}
                other => log::debug!("{:?}", other),
            }
        }
    }
}

fn load_settings(path: Option<&str>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match Settings::load(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("{e}; using default settings");
            Settings::default()
        }
    }
}

/// Optional preset name overrides whatever the settings file chose
fn apply_quality(settings: &mut Settings, name: Option<&str>) {
    let Some(name) = name else {
        return;
    };
    match QualityPreset::from_name(name) {
        Some(preset) => settings.quality = preset,
        None => log::warn!("Unknown quality preset '{name}'; keeping {}", settings.quality.as_str()),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args.first().and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_SEED);
    let ticks = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_TICKS);
    let mut settings = load_settings(args.get(2).map(String::as_str));
    apply_quality(&mut settings, args.get(3).map(String::as_str));

    log::info!("Toroids (headless) starting...");
    let mut game = Game::new(seed, settings);

    while game.world.time_ticks < ticks && game.world.phase != GamePhase::GameOver {
        game.update(SIM_DT);
    }

    let mut frame = CommandList::default();
    draw_world(&game.world, &mut frame);

    println!("seed:        {}", game.rng.seed());
    println!("quality:     {}", game.world.settings.quality.as_str());
    println!("ticks:       {}", game.world.time_ticks);
    println!("phase:       {:?}", game.world.phase);
    println!("level:       {}", game.world.level);
    println!("score:       {}", game.world.scoreboard.score);
    println!("lives:       {}", game.world.scoreboard.lives);
    println!("actors:      {}", game.world.actors.len());
    println!("particles:   {}", game.world.particles.len());
    println!("draw calls:  {}", frame.commands.len());
}

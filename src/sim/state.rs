//! World state and score reporting
//!
//! The [`World`] exclusively owns every actor. Actors only ever see each
//! other as an immutable slice during the collision pass.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, TickContext};
use super::particle::Particle;
use super::projectile::Owner;
use super::random::Randomness;
use super::ship;
use super::tick::TickInput;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player ran out of lives
    GameOver,
}

/// Notifications for the score/UI layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreIncreased { points: u32, total: u64 },
    LivesChanged { lives: u32 },
    GameOver { final_score: u64 },
    WaveStarted { level: u32, asteroids: u32 },
    SaucerSpawned { small: bool },
}

/// Receiver of scoring and lives updates
pub trait ScoreSink {
    fn score(&self) -> u64;
    fn lives(&self) -> u32;
    fn increment_score(&mut self, points: u32);
    fn report_lives_changed(&mut self, lives: u32);
    fn report_game_over(&mut self);
}

/// Score, lives and pending UI events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u64,
    pub lives: u32,
    pub game_over: bool,
    pub events: Vec<GameEvent>,
}

impl Scoreboard {
    pub fn new(lives: u32) -> Self {
        Self {
            lives,
            ..Self::default()
        }
    }
}

impl ScoreSink for Scoreboard {
    fn score(&self) -> u64 {
        self.score
    }

    fn lives(&self) -> u32 {
        self.lives
    }

    fn increment_score(&mut self, points: u32) {
        self.score += u64::from(points);
        self.events.push(GameEvent::ScoreIncreased {
            points,
            total: self.score,
        });
    }

    fn report_lives_changed(&mut self, lives: u32) {
        self.lives = lives;
        self.events.push(GameEvent::LivesChanged { lives });
    }

    fn report_game_over(&mut self) {
        self.game_over = true;
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub settings: Settings,
    /// Width/height of the toroidal arena
    pub resolution: Vec2,
    /// Active actors (order carries no meaning)
    pub actors: Vec<Actor>,
    /// Actors spawned during this tick, merged after integration
    pub spawn_queue: Vec<Actor>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Current wave (0 before the first wave spawns)
    pub level: u32,
    /// Ticks until the next saucer spawn attempt
    pub saucer_countdown: i32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub scoreboard: Scoreboard,
}

impl World {
    /// New game with the player ship at the arena centre
    pub fn new(settings: Settings, rng: &mut dyn Randomness) -> Self {
        let player = ship::spawn(
            settings.resolution / 2.0,
            settings.ship.spawn_invincibility_ticks,
        );
        Self::with_actors(settings, vec![player], rng)
    }

    /// World seeded with an explicit actor set (the player is optional)
    pub fn with_actors(settings: Settings, actors: Vec<Actor>, rng: &mut dyn Randomness) -> Self {
        let saucer_countdown =
            rng.uniform_int(settings.saucer.spawn_min_ticks, settings.saucer.spawn_max_ticks + 1);
        Self {
            resolution: settings.resolution,
            scoreboard: Scoreboard::new(settings.ship.starting_lives),
            settings,
            actors,
            spawn_queue: Vec::new(),
            particles: Vec::new(),
            level: 0,
            saucer_countdown,
            time_ticks: 0,
            phase: GamePhase::Playing,
        }
    }

    pub fn player(&self) -> Option<&Actor> {
        self.actors.iter().find(|a| a.is_player())
    }

    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.is_player())
    }

    /// Asteroids or saucers still present (dead ones count until reaped)
    pub fn hostiles_remaining(&self) -> bool {
        self.actors
            .iter()
            .chain(self.spawn_queue.iter())
            .any(|a| matches!(a.kind, ActorKind::Asteroid(_) | ActorKind::Saucer(_)))
    }

    pub fn saucer_active(&self) -> bool {
        self.actors
            .iter()
            .chain(self.spawn_queue.iter())
            .any(|a| matches!(a.kind, ActorKind::Saucer(_)))
    }

    pub fn count_asteroids(&self) -> usize {
        self.actors
            .iter()
            .filter(|a| matches!(a.kind, ActorKind::Asteroid(_)))
            .count()
    }

    /// Take pending UI events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.scoreboard.events)
    }

    /// Split the world into its actor list and a context over everything else
    pub(crate) fn split_for_tick<'a>(
        &'a mut self,
        input: &'a TickInput,
        rng: &'a mut dyn Randomness,
    ) -> (&'a mut Vec<Actor>, TickContext<'a>) {
        let player_position = self.player().filter(|p| !p.is_dead).map(|p| p.position);
        let player_projectiles = self
            .actors
            .iter()
            .chain(self.spawn_queue.iter())
            .filter(|a| a.projectile_owner() == Some(Owner::Player) && !a.is_dead)
            .count();
        let max_particles = self.settings.max_particles();

        let ctx = TickContext {
            settings: &self.settings,
            resolution: self.resolution,
            input,
            player_position,
            player_projectiles,
            max_particles,
            rng,
            spawn_queue: &mut self.spawn_queue,
            particles: &mut self.particles,
            scoreboard: &mut self.scoreboard,
        };
        (&mut self.actors, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::SimRng;

    #[test]
    fn test_new_world_has_centered_player() {
        let mut rng = SimRng::new(1);
        let world = World::new(Settings::default(), &mut rng);
        let player = world.player().expect("player spawned");
        assert_eq!(player.position, Vec2::new(400.0, 300.0));
        assert_eq!(world.scoreboard.lives, 3);
        assert_eq!(world.level, 0);
        assert!(world.saucer_countdown >= 600 && world.saucer_countdown <= 1500);
        assert!(!world.hostiles_remaining());
    }

    #[test]
    fn test_scoreboard_records_events() {
        let mut board = Scoreboard::new(3);
        board.increment_score(20);
        board.increment_score(50);
        board.report_lives_changed(2);
        board.report_game_over();
        assert_eq!(board.score, 70);
        assert!(board.game_over);
        assert_eq!(
            board.events,
            vec![
                GameEvent::ScoreIncreased { points: 20, total: 20 },
                GameEvent::ScoreIncreased { points: 50, total: 70 },
                GameEvent::LivesChanged { lives: 2 },
                GameEvent::GameOver { final_score: 70 },
            ]
        );
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut rng = SimRng::new(2);
        let mut world = World::new(Settings::default(), &mut rng);
        world.scoreboard.increment_score(100);
        assert_eq!(world.drain_events().len(), 1);
        assert!(world.drain_events().is_empty());
    }
}

//! Game state and core simulation types
//!
//! Everything the orchestrator mutates during a frame lives in [`GameState`].
//! Entities are owned exactly once: the player owns its sword, the
//! environment owns scenery and hostiles, each dragon owns its fireballs.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::monster::HostileKind;
use super::player::Player;
use super::timer::Cooldown;
use super::world::Environment;
use crate::tuning::Tuning;

/// Horizontal orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    pub fn is_right(self) -> bool {
        self == Facing::Right
    }

    pub fn from_right(facing_right: bool) -> Self {
        if facing_right {
            Facing::Right
        } else {
            Facing::Left
        }
    }

    /// +1 for right, -1 for left
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scene {
    #[default]
    Menu,
    Options,
    Playing,
    GameOver,
}

/// Things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SwordSwing,
    Jump,
    SwordGrew { level: u32 },
    TreeHit,
    TreeCut { coins: u32 },
    HostileHit { kind: HostileKind },
    HostileDefeated { kind: HostileKind, coins: u32 },
    FireballLaunched,
    FireballReflected,
    PlayerHurt { amount: i32, health: i32 },
    CoinCollected { value: u32 },
    CoinsSpawned { count: u32 },
    SceneChanged { from: Scene, to: Scene },
    SaveRequested,
    GameOver,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub scene: Scene,
    pub player: Player,
    pub environment: Environment,
    /// Simulation wall clock, advanced by each tick's elapsed milliseconds
    pub time_ms: u64,
    /// Frames simulated while playing
    pub frame: u64,
    /// Shared contact-damage cooldown for all monsters
    pub contact_cooldown: Cooldown,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh world with the default layout, ready to play
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let environment = Environment::generate(tuning, &mut rng, 0);
        let player = Player::spawn(tuning);
        log::info!("New world generated with seed {}", seed);
        Self {
            seed,
            rng,
            scene: Scene::Playing,
            player,
            environment,
            time_ms: 0,
            frame: 0,
            contact_cooldown: Cooldown::new(tuning.combat.contact_cooldown_ms),
            events: Vec::new(),
        }
    }

    /// Assemble a state from already-built parts (used by save restore)
    pub fn from_parts(
        seed: u64,
        tuning: &Tuning,
        scene: Scene,
        player: Player,
        environment: Environment,
        time_ms: u64,
    ) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            scene,
            player,
            environment,
            time_ms,
            frame: 0,
            contact_cooldown: Cooldown::new(tuning.combat.contact_cooldown_ms),
            events: Vec::new(),
        }
    }

    /// Switch scenes, announcing the change
    pub fn set_scene(&mut self, to: Scene) {
        if self.scene == to {
            return;
        }
        let from = self.scene;
        self.scene = to;
        log::info!("Scene {:?} -> {:?}", from, to);
        self.events.push(GameEvent::SceneChanged { from, to });
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_game_over(&self) -> bool {
        self.scene == Scene::GameOver
    }
}

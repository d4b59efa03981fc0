//! Growing Sword entry point
//!
//! Headless native runner. Windowing, drawing and real audio belong to a host
//! front end; this binary drives the simulation on a manual 60 FPS clock with
//! a scripted input sequence, routes events to a logging audio sink, and saves
//! through the same file store a real front end would use.
//!
//! Usage: `growing-sword [seed] [frames] [save_dir]`

use growing_sword::audio::{AudioManager, LogSink, MusicTrack};
use growing_sword::consts::TARGET_FPS;
use growing_sword::persistence::{self, PersistenceError, SaveStore};
use growing_sword::platform::{Clock, FrameTimer, Key, KeyEvent, ManualClock};
use growing_sword::render;
use growing_sword::sim::{GameEvent, GameState, Scene, TickInput, tick};
use growing_sword::{Settings, Tuning};

const FRAME_MS: u64 = 1000 / TARGET_FPS as u64;

struct Game {
    state: GameState,
    tuning: Tuning,
    settings: Settings,
    store: SaveStore,
    audio: AudioManager<LogSink>,
    clock: ManualClock,
    timer: FrameTimer,
}

impl Game {
    fn new(seed: u64, store: SaveStore) -> Self {
        let tuning = Tuning::default();
        let mut settings = Settings::load(store.dir());
        let state = match load_saved_game(&store, &tuning, seed) {
            Some((mut state, saved)) => {
                settings.music_volume = saved.music_volume;
                settings.sfx_volume = saved.sfx_volume;
                state.set_scene(Scene::Playing);
                state
            }
            None => {
                log::info!("Starting new game with seed {}", seed);
                GameState::new(seed, &tuning)
            }
        };

        let mut audio = AudioManager::new(LogSink, &settings);
        audio.change_music(MusicTrack::for_scene(state.scene));

        let mut clock = ManualClock::default();
        clock.advance(state.time_ms);
        let mut timer = FrameTimer::default();
        timer.elapsed_ms(&clock);

        Self {
            state,
            tuning,
            settings,
            store,
            audio,
            clock,
            timer,
        }
    }

    /// Run one frame and react to what happened in it
    fn frame(&mut self, input: &TickInput) {
        self.clock.advance(FRAME_MS);
        let dt_ms = self.timer.elapsed_ms(&self.clock);
        tick(&mut self.state, &self.tuning, input, dt_ms);

        let events = self.state.drain_events();
        self.audio.dispatch(&events);
        for event in &events {
            match event {
                GameEvent::SaveRequested => self.save_game(),
                GameEvent::GameOver => self.clear_saved_game(),
                GameEvent::SwordGrew { level } => log::info!("Sword reached level {}", level),
                _ => {}
            }
        }
    }

    fn save_game(&self) {
        let record = persistence::capture(&self.state, &self.settings);
        if let Err(e) = self.store.save(&record) {
            log::warn!("Save failed: {}", e);
        }
        self.settings.save(self.store.dir());
    }

    fn clear_saved_game(&self) {
        match self.store.clear() {
            Ok(()) => log::info!("Saved game cleared"),
            Err(e) => log::warn!("Could not clear save: {}", e),
        }
    }
}

/// A missing or unreadable save means a fresh world
fn load_saved_game(store: &SaveStore, tuning: &Tuning, seed: u64) -> Option<(GameState, Settings)> {
    let restored = store
        .load()
        .and_then(|record| persistence::restore(&record, tuning, seed));
    match restored {
        Ok(loaded) => Some(loaded),
        Err(PersistenceError::NoSaveData) => None,
        Err(e) => {
            log::warn!("Ignoring save: {}", e);
            None
        }
    }
}

/// Walk right swinging, jump onto the middle platform, come back, save
fn demo_input(frame: u64) -> TickInput {
    let events = match frame {
        30 => vec![KeyEvent::down(Key::Right)],
        90 => vec![KeyEvent::up(Key::Right), KeyEvent::down(Key::Attack)],
        120 => vec![KeyEvent::down(Key::Jump)],
        180 => vec![KeyEvent::down(Key::Left)],
        260 => vec![KeyEvent::up(Key::Left)],
        f if f % 45 == 0 => vec![KeyEvent::down(Key::Attack)],
        _ => Vec::new(),
    };
    TickInput::from_events(events)
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Growing Sword (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5eed);
    let frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);
    let store = args.next().map(SaveStore::new).unwrap_or_default();

    let mut game = Game::new(seed, store);
    for frame in 0..frames {
        if game.state.scene != Scene::Playing {
            break;
        }
        game.frame(&demo_input(frame));
    }

    if game.state.scene == Scene::Playing {
        game.frame(&TickInput::from_events([KeyEvent::down(Key::Save)]));
    }

    let hud = render::snapshot(&game.state).hud;
    log::info!(
        "Finished after {} ms: health {}, coins {}, sword level {} (damage {})",
        game.clock.now_ms(),
        hud.health,
        hud.coins,
        hud.sword_level,
        hud.sword_damage
    );
}

use std::fs;
use std::path::PathBuf;

use glam::Vec2;

use growing_sword::Tuning;
use growing_sword::persistence::*;
use growing_sword::platform::{Key, KeyEvent};
use growing_sword::settings::Settings;
use growing_sword::sim::*;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("growing-sword-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn played_state(tuning: &Tuning) -> GameState {
    let mut state = GameState::new(31, tuning);
    for frame in 0..240u64 {
        let input = if frame == 10 {
            TickInput::from_events([KeyEvent::down(Key::Right)])
        } else {
            TickInput::none()
        };
        tick(&mut state, tuning, &input, 16);
    }
    state
}

#[test]
fn store_round_trip() {
    let tuning = Tuning::default();
    let dir = temp_dir("round-trip");
    let store = SaveStore::new(&dir);

    let state = played_state(&tuning);
    let record = capture(&state, &Settings::default());
    store.save(&record).unwrap();

    assert!(store.exists());
    assert!(!dir.join("savegame.json.tmp").exists());

    let loaded = store.load().unwrap();
    assert_eq!(loaded, record);

    let (restored, _) = restore(&loaded, &tuning, 31).unwrap();
    assert_eq!(restored.player.aabb(), state.player.aabb());
    assert_eq!(restored.player.coins, state.player.coins);
    assert_eq!(restored.environment.hostiles.len(), state.environment.hostiles.len());
    for (a, b) in restored.environment.hostiles.iter().zip(&state.environment.hostiles) {
        assert_eq!(a.kind(), b.kind());
        assert_eq!(a.health(), b.health());
        assert_eq!(a.is_alive(), b.is_alive());
        assert_eq!(a.aabb(), b.aabb());
    }
    for (a, b) in restored.environment.trees.iter().zip(&state.environment.trees) {
        assert_eq!(a, b);
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn scenario_player_and_dragon_survive_reload() {
    let tuning = Tuning::default();
    let dir = temp_dir("scenario");
    let store = SaveStore::new(&dir);

    let mut player = Player::new(Vec2::new(100.0, 200.0), &tuning);
    player.health = 80;
    player.collect_coin(12);
    let mut dragon = Dragon::new(Vec2::new(300.0, 150.0), &tuning, 0);
    dragon.health = 40;
    let mut environment = Environment::empty();
    environment.hostiles.push(Hostile::Dragon(dragon));
    let state = GameState::from_parts(1, &tuning, Scene::Playing, player, environment, 0);

    store.save(&capture(&state, &Settings::default())).unwrap();
    let record = store.load().unwrap();

    assert_eq!(record.player.x, 100.0);
    assert_eq!(record.player.y, 200.0);
    assert_eq!(record.player.health, 80);
    assert_eq!(record.player.coins, 12);
    let dragon = &record.environment.monsters[0];
    assert_eq!(dragon.kind, HostileKind::Dragon);
    assert_eq!(dragon.health, 40);
    assert!(dragon.is_alive);
    assert_eq!((dragon.x, dragon.y), (300.0, 150.0));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_save_is_no_save_data() {
    let store = SaveStore::new(temp_dir("missing"));
    let err = store.load().unwrap_err();
    assert!(matches!(err, PersistenceError::NoSaveData));
    assert!(err.is_recoverable());
}

#[test]
fn corrupt_save_is_reported_not_fatal() {
    let dir = temp_dir("corrupt");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(SAVE_FILE_NAME), "{ \"player\": ").unwrap();

    let store = SaveStore::new(&dir);
    let err = store.load().unwrap_err();
    assert!(matches!(err, PersistenceError::Corrupt { .. }));
    assert!(err.is_recoverable());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn clear_removes_save() {
    let tuning = Tuning::default();
    let dir = temp_dir("clear");
    let store = SaveStore::new(&dir);
    store
        .save(&capture(&GameState::new(1, &tuning), &Settings::default()))
        .unwrap();
    store.clear().unwrap();
    assert!(!store.exists());
    // Clearing twice is fine
    store.clear().unwrap();

    let _ = fs::remove_dir_all(&dir);
}

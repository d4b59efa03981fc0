//! Audio requests derived from game events
//!
//! The simulation never plays sound itself. The host drains [`GameEvent`]s
//! each frame and hands them to an [`AudioManager`], which turns them into
//! fire-and-forget effect requests and music changes on an [`AudioSink`].

use crate::settings::Settings;
use crate::sim::{GameEvent, Scene};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Sword swing starts
    Swing,
    /// Player leaves the ground
    Jump,
    /// Blade hits a tree
    TreeChop,
    /// Blade or reflected fireball hits a hostile
    HostileHit,
    /// Monster or dragon dies
    HostileDefeated,
    /// Dragon breathes a fireball
    Fireball,
    /// Sword knocks a fireball back
    Reflect,
    /// Player takes damage
    PlayerHurt,
    /// Coin picked up
    CoinPickup,
    /// Sword reached a new growth level
    SwordGrow,
    /// Player died
    GameOver,
}

impl SoundEffect {
    /// Asset the host should load for this effect
    pub fn asset_path(&self) -> &'static str {
        match self {
            SoundEffect::Swing => "assets/sounds/swing_sfx.wav",
            SoundEffect::Jump => "assets/sounds/jump_sfx.wav",
            SoundEffect::TreeChop => "assets/sounds/chop_sfx.wav",
            SoundEffect::HostileHit => "assets/sounds/hit_sfx.wav",
            SoundEffect::HostileDefeated => "assets/sounds/defeat_sfx.wav",
            SoundEffect::Fireball => "assets/sounds/fireball_sfx.wav",
            SoundEffect::Reflect => "assets/sounds/reflect_sfx.wav",
            SoundEffect::PlayerHurt => "assets/sounds/hurt_sfx.wav",
            SoundEffect::CoinPickup => "assets/sounds/coin_sfx.wav",
            SoundEffect::SwordGrow => "assets/sounds/grow_sfx.wav",
            SoundEffect::GameOver => "assets/sounds/game_over_sfx.wav",
        }
    }
}

/// Background music
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    Game,
}

impl MusicTrack {
    pub fn asset_path(&self) -> &'static str {
        match self {
            MusicTrack::Menu => "assets/sounds/orb8bt.mp3",
            MusicTrack::Game => "assets/sounds/game_music.mp3",
        }
    }

    /// Menu and options share the menu track; other scenes are silent
    pub fn for_scene(scene: Scene) -> Option<Self> {
        match scene {
            Scene::Menu | Scene::Options => Some(MusicTrack::Menu),
            Scene::Playing => Some(MusicTrack::Game),
            Scene::GameOver => None,
        }
    }
}

/// Map a game event to the effect it should trigger, if any
pub fn effect_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::SwordSwing => Some(SoundEffect::Swing),
        GameEvent::Jump => Some(SoundEffect::Jump),
        GameEvent::TreeHit => Some(SoundEffect::TreeChop),
        GameEvent::HostileHit { .. } => Some(SoundEffect::HostileHit),
        GameEvent::HostileDefeated { .. } => Some(SoundEffect::HostileDefeated),
        GameEvent::FireballLaunched => Some(SoundEffect::Fireball),
        GameEvent::FireballReflected => Some(SoundEffect::Reflect),
        GameEvent::PlayerHurt { .. } => Some(SoundEffect::PlayerHurt),
        GameEvent::CoinCollected { .. } => Some(SoundEffect::CoinPickup),
        GameEvent::SwordGrew { .. } => Some(SoundEffect::SwordGrow),
        GameEvent::GameOver => Some(SoundEffect::GameOver),
        GameEvent::TreeCut { .. }
        | GameEvent::CoinsSpawned { .. }
        | GameEvent::SceneChanged { .. }
        | GameEvent::SaveRequested => None,
    }
}

/// Whatever actually makes noise (mixer, web audio, a log)
pub trait AudioSink {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
    fn play_music(&mut self, track: MusicTrack, volume: f32);
    fn stop_music(&mut self);
}

/// Sink that only logs requests (headless runs)
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} at {:.2}", effect, volume);
    }

    fn play_music(&mut self, track: MusicTrack, volume: f32) {
        log::info!("Playing music {} at {:.2}", track.asset_path(), volume);
    }

    fn stop_music(&mut self) {
        log::info!("Music stopped");
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
    current_track: Option<MusicTrack>,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, settings: &Settings) -> Self {
        Self {
            sink,
            music_volume: settings.music_volume,
            sfx_volume: settings.sfx_volume,
            muted: settings.mute,
            current_track: None,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current_track
    }

    fn effective_music_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }

    fn effective_sfx_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.effective_sfx_volume();
        if volume <= 0.0 {
            return;
        }
        self.sink.play_effect(effect, volume);
    }

    /// Switch tracks; asking for the one already playing does nothing
    pub fn change_music(&mut self, track: Option<MusicTrack>) {
        if track == self.current_track {
            return;
        }
        match track {
            Some(track) => {
                let volume = self.effective_music_volume();
                self.sink.play_music(track, volume);
            }
            None => self.sink.stop_music(),
        }
        self.current_track = track;
    }

    /// Route one frame's events: effects, plus music on scene changes
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::SceneChanged { to, .. } = event {
                self.change_music(MusicTrack::for_scene(*to));
            }
            if let Some(effect) = effect_for(event) {
                self.play(effect);
            }
        }
    }
}

//! Game settings and preferences
//!
//! Volumes are also written into each save record; the full settings are
//! persisted separately as `settings.json` next to the save file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything without losing the volume levels
    pub mute: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 0.5,
            sfx_volume: 0.75,
            mute: false,
        }
    }
}

impl Settings {
    /// File name used by [`Settings::load`] / [`Settings::save`]
    pub const FILE_NAME: &'static str = "settings.json";

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = clamp_volume(volume);
        log::info!("Music volume set to {:.2}", self.music_volume);
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = clamp_volume(volume);
        log::info!("Effects volume set to {:.2}", self.sfx_volume);
    }

    /// Load from `dir/settings.json`, falling back to defaults
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(Self::FILE_NAME);
        match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    settings.music_volume = clamp_volume(settings.music_volume);
                    settings.sfx_volume = clamp_volume(settings.sfx_volume);
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable settings {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save to `dir/settings.json`; failures are logged, never fatal
    pub fn save(&self, dir: &Path) {
        let path = dir.join(Self::FILE_NAME);
        let result = fs::create_dir_all(dir)
            .map_err(|e| e.to_string())
            .and_then(|_| serde_json::to_string_pretty(self).map_err(|e| e.to_string()))
            .and_then(|json| fs::write(&path, json).map_err(|e| e.to_string()));
        match result {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings to {}: {}", path.display(), e),
        }
    }
}

/// Clamp to [0, 1]; NaN becomes silence
fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_clamp() {
        let mut settings = Settings::default();
        settings.set_music_volume(1.7);
        settings.set_sfx_volume(-0.2);
        assert_eq!(settings.music_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
        settings.set_sfx_volume(f32::NAN);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"mute": true}"#).unwrap();
        assert!(settings.mute);
        assert_eq!(settings.sfx_volume, 0.75);
    }

    #[test]
    fn test_save_and_load_from_dir() {
        let dir = std::env::temp_dir().join(format!("growing-sword-settings-{}", std::process::id()));
        let mut settings = Settings::default();
        settings.set_music_volume(0.2);
        settings.save(&dir);
        assert_eq!(Settings::load(&dir), settings);
        let _ = fs::remove_dir_all(&dir);
    }
}

//! Player preferences
//!
//! Persisted separately from the leaderboard in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::renderer::THEMES;

/// Name used when the player leaves the field blank
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name submitted with leaderboard entries
    pub player_name: String,
    /// Index into the scenery themes
    pub theme_index: usize,
    /// Sound effects on/off
    pub sound_on: bool,
    /// Frame timing overlay
    pub show_debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            theme_index: 0,
            sound_on: true,
            show_debug: false,
        }
    }
}

/// Trim a typed name, falling back to the placeholder when nothing is left
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_PLAYER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

impl Settings {
    /// Copy with out-of-range or blank values replaced by defaults
    pub fn sanitized(&self) -> Self {
        let theme_index = if self.theme_index < THEMES.len() {
            self.theme_index
        } else {
            0
        };
        Self {
            player_name: normalize_name(&self.player_name),
            theme_index,
            ..self.clone()
        }
    }

    /// Parse stored JSON, falling back to defaults for anything unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dash_runner_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Rina "), "Rina");
        assert_eq!(normalize_name("   "), DEFAULT_PLAYER_NAME);
        assert_eq!(normalize_name(""), DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_invalid_theme_defaults_to_first() {
        let settings = Settings {
            theme_index: 7,
            ..Settings::default()
        };
        assert_eq!(settings.sanitized().theme_index, 0);
    }

    #[test]
    fn test_from_json() {
        let settings = Settings::from_json(r#"{ "theme_index": 2, "player_name": "" }"#);
        assert_eq!(settings.theme_index, 2);
        assert_eq!(settings.player_name, DEFAULT_PLAYER_NAME);
        assert!(settings.sound_on);

        assert_eq!(Settings::from_json("not json"), Settings::default());
    }
}

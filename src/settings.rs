//! Game settings and preferences
//!
//! Loaded from a JSON file when one is given, otherwise from the environment.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Silence every cue
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Telemetry ===
    /// Send play logs
    pub telemetry: bool,
    /// Externally assigned player identifier
    pub player_id: String,

    // === Determinism ===
    /// Fixed RNG seed; wall-clock seeding when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 1.0,
            sfx_volume: 1.0,
            telemetry: false,
            player_id: String::new(),
            seed: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build settings from a variable lookup (`GAME_LOGGING`, `GAME_PLAYER_ID`,
    /// `GAME_SEED`, `GAME_MUTE`)
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        settings.telemetry = var("GAME_LOGGING").as_deref() == Some("1");
        settings.muted = var("GAME_MUTE").as_deref() == Some("1");
        if let Some(player_id) = var("GAME_PLAYER_ID") {
            settings.player_id = player_id;
        }
        if let Some(seed) = var("GAME_SEED") {
            match seed.trim().parse() {
                Ok(seed) => settings.seed = Some(seed),
                Err(_) => log::warn!("Ignoring non-numeric GAME_SEED {:?}", seed),
            }
        }

        settings
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = serde_json::from_str(&json)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("writing settings to {}", path.display()))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_vars() {
        let settings = Settings::from_vars(vars(&[
            ("GAME_LOGGING", "1"),
            ("GAME_PLAYER_ID", "player-7"),
            ("GAME_SEED", " 1234 "),
        ]));
        assert!(settings.telemetry);
        assert!(!settings.muted);
        assert_eq!(settings.player_id, "player-7");
        assert_eq!(settings.seed, Some(1234));
    }

    #[test]
    fn test_bad_seed_ignored() {
        let settings = Settings::from_vars(vars(&[("GAME_SEED", "soon"), ("GAME_LOGGING", "yes")]));
        assert_eq!(settings.seed, None);
        assert!(!settings.telemetry);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "muted": true, "seed": 9 }"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_save_and_load_file() {
        let file_name = format!("rhinoceros-settings-{}.json", std::process::id());
        let path = std::env::temp_dir().join(file_name);
        let settings = Settings {
            sfx_volume: 0.5,
            player_id: "abc".into(),
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Settings::load(Path::new("/nonexistent/rhinoceros.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("reading settings"));
    }
}

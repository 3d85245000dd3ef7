use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants;
use crate::utils::BridgeError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub segments: SegmentsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Suppresses the playback-ended notification on the audio-only variant
    /// of the host site.
    #[serde(default)]
    pub audio_only: bool,

    /// Minimum video duration, seconds, before progress gets persisted.
    #[serde(default = "default_min_persist_duration")]
    pub min_persist_duration_secs: f64,

    /// Window between persistence write bursts, seconds.
    #[serde(default = "default_save_interval")]
    pub save_interval_secs: u64,

    /// Rates synthesized into the host speed menu, above the native ceiling.
    #[serde(default = "default_custom_rates")]
    pub custom_rates: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentsConfig {
    /// Master switch for fetching and enforcing skip segments.
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_segments_api")]
    pub api_base_url: String,

    /// Segment categories requested from the provider.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            audio_only: false,
            min_persist_duration_secs: default_min_persist_duration(),
            save_interval_secs: default_save_interval(),
            custom_rates: default_custom_rates(),
        }
    }
}

impl Default for SegmentsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base_url: default_segments_api(),
            categories: default_categories(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let config = Self::load_from(&config_path)?;
            info!("Config loaded from {:?}", config_path);
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let config = toml::from_str(&contents).map_err(|err| {
            BridgeError::Configuration(format!("invalid config file {}: {err}", path.display()))
        })?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).map_err(|err| {
            BridgeError::Configuration(format!("unserializable config: {err}"))
        })?;
        fs::write(&config_path, contents).context("Failed to write config file")?;

        debug!("Config saved to {:?}", config_path);
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            BridgeError::Configuration("could not determine the user config directory".to_string())
        })?;
        Ok(config_dir.join("nou-bridge").join("config.toml"))
    }
}

fn default_true() -> bool {
    true
}

fn default_min_persist_duration() -> f64 {
    constants::MIN_PERSIST_DURATION_SECS
}

fn default_save_interval() -> u64 {
    constants::PROGRESS_SAVE_INTERVAL.as_secs()
}

fn default_custom_rates() -> Vec<f64> {
    constants::CUSTOM_MENU_RATES.to_vec()
}

fn default_segments_api() -> String {
    "https://sponsor.ajay.app".to_string()
}

fn default_categories() -> Vec<String> {
    vec!["sponsor".to_string()]
}

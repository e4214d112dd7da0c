//! Configuration types for the text pipeline and viseme engine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration for the lilt crate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LiltConfig {
    /// Text pipeline settings.
    pub text: TextPipelineConfig,
    /// Viseme mapping and playback settings.
    pub viseme: VisemeConfig,
}

/// Text pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextPipelineConfig {
    /// Wall-clock threshold in milliseconds above which a single processor
    /// run is logged as slow.
    ///
    /// This is a diagnostic signal only; a slow processor is never an
    /// error. Typical runs over chat-sized replies finish well under 1 ms.
    pub slow_processor_warn_ms: u64,
}

impl Default for TextPipelineConfig {
    fn default() -> Self {
        Self {
            slow_processor_warn_ms: 10,
        }
    }
}

/// Viseme mapping configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisemeConfig {
    /// Estimated speech time per character in seconds, used when the real
    /// utterance duration is not yet known (audio still synthesizing).
    ///
    /// 0.15 s/char approximates conversational English TTS output. Once
    /// the decoded audio duration is available, callers should pass it to
    /// the mapper instead of relying on this estimate.
    pub seconds_per_char: f32,
    /// Duration in seconds assumed for a cue that carries no explicit
    /// duration when resolving playback position.
    pub fallback_cue_seconds: f32,
}

impl Default for VisemeConfig {
    fn default() -> Self {
        Self {
            seconds_per_char: 0.15,
            fallback_cue_seconds: 0.1,
        }
    }
}

impl LiltConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::PipelineError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::PipelineError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/lilt/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("lilt").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("lilt")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/lilt-config/config.toml")
        }
    }
}

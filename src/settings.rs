//! Host-side settings for the muxlog bridge binary.
//!
//! [`Settings::load`] reads `~/.config/muxlog/config.toml`, creating it
//! with hardcoded defaults if it does not yet exist. [`Settings::defaults`]
//! returns the same defaults without touching the filesystem (useful in
//! tests). These settings cover the bridge only — sink destinations and
//! the severity threshold live in the multiplexer's persisted state blob
//! and are changed through its setters.

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_SETTINGS: &str = r#"
system_name = "muxlog"
state_file  = ""

[flow]
pause_buffer_bytes  = 1000
pause_timeout_ms    = 15000
service_interval_ms = 50
"#;

// ---------------------------------------------------------------------------
// Public settings types
// ---------------------------------------------------------------------------

/// Top-level bridge settings, loaded from `~/.config/muxlog/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// System identifier used in the HTTP request path.
    #[serde(default = "default_system_name")]
    pub system_name: String,
    /// Path of the persisted sink-configuration blob. Empty means
    /// `<config dir>/state.json`.
    #[serde(default)]
    pub state_file: String,
    #[serde(default)]
    pub flow: FlowSettings,
}

/// `[flow]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FlowSettings {
    #[serde(default = "default_pause_buffer_bytes")]
    pub pause_buffer_bytes: usize,
    #[serde(default = "default_pause_timeout_ms")]
    pub pause_timeout_ms: u64,
    #[serde(default = "default_service_interval_ms")]
    pub service_interval_ms: u64,
}

fn default_system_name() -> String {
    "muxlog".to_string()
}
fn default_pause_buffer_bytes() -> usize {
    1000
}
fn default_pause_timeout_ms() -> u64 {
    15_000
}
fn default_service_interval_ms() -> u64 {
    50
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            pause_buffer_bytes: default_pause_buffer_bytes(),
            pause_timeout_ms: default_pause_timeout_ms(),
            service_interval_ms: default_service_interval_ms(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Settings {
    /// Load from `~/.config/muxlog/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not
    /// exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_SETTINGS.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SETTINGS, config::FileFormat::Toml))
            .build()
            .expect("built-in default settings must be valid TOML")
            .try_deserialize()
            .expect("built-in default settings must deserialize correctly")
    }

    /// Resolved path of the persisted sink-configuration blob.
    pub fn state_path(&self) -> PathBuf {
        if self.state_file.is_empty() {
            config_dir().join("state.json")
        } else {
            PathBuf::from(&self.state_file)
        }
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("muxlog")
}

fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

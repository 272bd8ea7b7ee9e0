//! Host tool settings.
//!
//! Loaded with figment, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. `ringlog.toml` (or the file given with `--config`)
//! 3. Environment variables prefixed with `RINGLOG_`; nested keys are separated by a
//!    double underscore, e.g. `RINGLOG_TARGET__BASE_OFFSET=4096`
//!
//! Command-line flags are applied on top by the binaries.
//!
//! ```toml
//! [target]
//! image = "ringlog.bin"
//! base_offset = 0
//!
//! [log]
//! level = "info"
//!
//! [sim]
//! interval_ms = 100
//! count = 0
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "ringlog.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "RINGLOG_";

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub target: TargetConfig,
    pub log: LogConfig,
    pub sim: SimConfig,
}

/// Where the log region lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// File or device node exposing the target memory.
    pub image: PathBuf,
    /// Byte offset of the ring region inside `image`.
    pub base_offset: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            image: PathBuf::from("ringlog.bin"),
            base_offset: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum tracing level for the host tools.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self { Self { level: "info".to_string() } }
}

/// Simulator pacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Delay between pushed lines.
    pub interval_ms: u64,
    /// Lines to push before exiting; 0 runs until interrupted.
    pub count: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            count: 0,
        }
    }
}

impl Settings {
    /// Load settings from `path` (or [`DEFAULT_CONFIG_FILE`]) and the environment.
    ///
    /// A missing file is not an error; the defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE))).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check values figment cannot check by type alone.
    pub fn validate(&self) -> Result<(), String> {
        if !VALID_LEVELS.contains(&self.log.level.to_ascii_lowercase().as_str()) {
            return Err(format!(
                "invalid log level '{}', expected one of: {}",
                self.log.level,
                VALID_LEVELS.join(", ")
            ));
        }
        if self.target.image.as_os_str().is_empty() {
            return Err("target.image must not be empty".to_string());
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Configuration loading and typed config structures for the pipeline.
//!
//! The canonical configuration lives in `stumpcast.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure and provides a loader that reads and validates the file.
//! Every field has a default, so a missing file or empty document is a
//! fully usable configuration.

use std::path::Path;

use serde::Deserialize;

use crate::queue::OverflowPolicy;
use crate::scoreboard::InningsResetPolicy;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level pipeline configuration.
///
/// Mirrors the structure of `stumpcast.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PipelineConfig {
    /// Feed buffer settings.
    #[serde(default)]
    pub feed: FeedConfig,

    /// Producer and drain cadence.
    #[serde(default)]
    pub timing: TimingConfig,

    /// Ingestion queue bound and overflow policy.
    #[serde(default)]
    pub queue: QueueConfig,

    /// Scoreboard fold behavior.
    #[serde(default)]
    pub scoreboard: ScoreboardConfig,

    /// Run boundary parameters.
    #[serde(default)]
    pub bounds: BoundsConfig,

    /// Observer server settings.
    #[serde(default)]
    pub observer: ObserverConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `OBSERVER_PORT` environment variable overrides
    /// `observer.port`, so deployments can remap the port without
    /// editing the YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.observer.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.observer.apply_env_overrides();
        Ok(config)
    }
}

/// Feed buffer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedConfig {
    /// Maximum events held in the feed buffer.
    #[serde(default = "default_feed_capacity")]
    pub capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            capacity: default_feed_capacity(),
        }
    }
}

/// Producer and drain tick cadence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimingConfig {
    /// Milliseconds between producer ticks.
    #[serde(default = "default_producer_interval_ms")]
    pub producer_interval_ms: u64,

    /// Milliseconds between drain ticks.
    #[serde(default = "default_drain_interval_ms")]
    pub drain_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            producer_interval_ms: default_producer_interval_ms(),
            drain_interval_ms: default_drain_interval_ms(),
        }
    }
}

/// Ingestion queue configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueueConfig {
    /// Maximum pending events before the overflow policy applies.
    /// 0 means unbounded.
    #[serde(default)]
    pub max_pending: usize,

    /// Which side of the queue to drop when full.
    #[serde(default)]
    pub overflow_policy: OverflowPolicy,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_pending: 0,
            overflow_policy: OverflowPolicy::default(),
        }
    }
}

/// Scoreboard fold configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScoreboardConfig {
    /// Whether an innings break also resets completed overs.
    #[serde(default)]
    pub reset_overs_on_new_innings: bool,
}

impl ScoreboardConfig {
    /// The typed reset policy this configuration selects.
    pub const fn reset_policy(&self) -> InningsResetPolicy {
        if self.reset_overs_on_new_innings {
            InningsResetPolicy::ResetOvers
        } else {
            InningsResetPolicy::RetainOvers
        }
    }
}

/// Run boundary configuration.
///
/// A value of 0 for `max_events` means unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BoundsConfig {
    /// Maximum events to ingest before the run ends (0 = unlimited).
    #[serde(default)]
    pub max_events: u64,
}

/// Observer server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObserverConfig {
    /// Host address the observer binds to.
    #[serde(default = "default_observer_host")]
    pub host: String,

    /// TCP port the observer listens on.
    #[serde(default = "default_observer_port")]
    pub port: u16,
}

impl ObserverConfig {
    /// Override the observer port with the `OBSERVER_PORT` environment
    /// variable when set and parseable.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("OBSERVER_PORT")
            && let Ok(port) = val.parse::<u16>()
        {
            self.port = port;
        }
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            host: default_observer_host(),
            port: default_observer_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_feed_capacity() -> usize {
    100
}

const fn default_producer_interval_ms() -> u64 {
    3000
}

const fn default_drain_interval_ms() -> u64 {
    200
}

fn default_observer_host() -> String {
    String::from("0.0.0.0")
}

const fn default_observer_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    String::from("info")
}

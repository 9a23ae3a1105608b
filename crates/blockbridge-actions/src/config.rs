//! Configuration loading and defaults for the action layer.
//!
//! Every tunable the dispatcher and perception query use lives in
//! [`ActionConfig`]. Defaults match the documented constants; a YAML file
//! (see `blockbridge.yaml` at the repository root) may override any subset.

use std::path::Path;
use std::time::Duration;

use blockbridge_types::MovementProfile;
use serde::Deserialize;

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

/// Tunables for command handling.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Acceptance radius of the `move_forward` goal (default: 1.0).
    pub goal_range: f64,

    /// Movement profile installed before each navigation goal.
    pub movement: MovementProfile,

    /// How long `jump` holds the jump control, in ms (default: 100).
    ///
    /// The session exposes no "landed" signal, so a fixed hold stands in
    /// for one.
    pub jump_hold_ms: u64,

    /// Attack targets must be strictly closer than this (default: 4.0).
    pub attack_range: f64,

    /// Cap on the block list of a perception report (default: 20).
    pub max_reported_blocks: usize,

    /// Radius used when a `look_around` call omits one (default: 5).
    pub default_look_radius: u32,

    /// Backstop for `move_forward`, in ms (default: 60000).
    ///
    /// If neither navigation signal arrives in time the goal is cleared and
    /// the command settles with a path timeout. `None` waits on the
    /// pathfinder alone.
    pub navigation_deadline_ms: Option<u64>,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            goal_range: 1.0,
            movement: MovementProfile::default(),
            jump_hold_ms: 100,
            attack_range: 4.0,
            max_reported_blocks: 20,
            default_look_radius: 5,
            navigation_deadline_ms: Some(60_000),
        }
    }
}

impl ActionConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// The jump hold as a [`Duration`].
    pub const fn jump_hold(&self) -> Duration {
        Duration::from_millis(self.jump_hold_ms)
    }

    /// The navigation backstop as a [`Duration`], if enabled.
    pub fn navigation_deadline(&self) -> Option<Duration> {
        self.navigation_deadline_ms.map(Duration::from_millis)
    }
}

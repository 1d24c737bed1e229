//! Engine configuration.
//!
//! Loaded from an optional TOML file merged with `FESTIVAL_`-prefixed
//! environment variables (e.g. `FESTIVAL_MAX_PERFORMANCES=500`).
//! Every field has a default, so an empty source yields a usable config.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, Result};

pub const DEFAULT_MAX_PERFORMANCES: usize = 10_000;
pub const ENV_PREFIX: &str = "FESTIVAL_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on simultaneously booked performances.
    #[serde(default = "default_max_performances")]
    pub max_performances: usize,
    /// Publish a timeline snapshot to the broadcaster after each mutation.
    #[serde(default = "bool_true")]
    pub publish_snapshots: bool,
    /// Include artist media references in snapshots.
    #[serde(default = "bool_true")]
    pub snapshot_media: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_performances: DEFAULT_MAX_PERFORMANCES,
            publish_snapshots: true,
            snapshot_media: true,
        }
    }
}

impl EngineConfig {
    /// Loads defaults, then the TOML file (if given), then the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(EngineConfig::default()));
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }
        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Parses a TOML document on top of the defaults, ignoring the environment.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::extract(
            Figment::from(Serialized::defaults(EngineConfig::default()))
                .merge(Toml::string(toml)),
        )
    }

    /// Sets the performance capacity.
    pub fn with_max_performances(mut self, max: usize) -> Self {
        self.max_performances = max;
        self
    }

    /// Enables or disables snapshot publishing.
    pub fn with_publish_snapshots(mut self, enabled: bool) -> Self {
        self.publish_snapshots = enabled;
        self
    }

    /// Enables or disables media references in snapshots.
    pub fn with_snapshot_media(mut self, enabled: bool) -> Self {
        self.snapshot_media = enabled;
        self
    }

    fn extract(figment: Figment) -> Result<Self> {
        figment
            .extract()
            .map_err(|e| EngineError::Config(e.to_string()))
    }
}

fn default_max_performances() -> usize {
    DEFAULT_MAX_PERFORMANCES
}

fn bool_true() -> bool {
    true
}

//! Layered configuration loading using figment.
//!
//! Sources (highest wins):
//! 1. Environment variables (`CHAISPAS_*`, `__` separates sections)
//! 2. `--config FILE` or `./chaispas.toml`
//! 3. `~/.config/chaispas/config.toml`
//! 4. Built-in defaults
//!
//! `CHAISPAS_ANALYTICS__RETENTION=50` -> `analytics.retention = 50`.

use std::path::{Path, PathBuf};

use chaispas_core::AnalyticsLimits;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StorageConfig {
    /// JSON log file. Defaults to `<data dir>/chaispas/decisions.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DecideConfig {
    /// Pause before the winner is revealed. Counted in `decisionTime`.
    #[serde(default)]
    pub reveal_delay_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ChaispasConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub analytics: AnalyticsLimits,
    #[serde(default)]
    pub decide: DecideConfig,
}

impl ChaispasConfig {
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(explicit).extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global) = Self::global_config_path()
            && global.exists()
        {
            figment = figment.merge(Toml::file(global));
        }

        let local = explicit.map_or_else(|| PathBuf::from("chaispas.toml"), Path::to_path_buf);
        figment = figment.merge(Toml::file(local));

        figment.merge(Env::prefixed("CHAISPAS_").split("__"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.analytics.retention == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analytics.retention".to_string(),
                reason: "must keep at least one decision".to_string(),
            });
        }
        Ok(())
    }

    /// Where the decision log lives.
    pub fn storage_path(&self) -> PathBuf {
        self.storage.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("chaispas")
                .join("decisions.json")
        })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("chaispas").join("config.toml"))
    }
}

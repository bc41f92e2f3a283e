//! # biz-config
//!
//! Layered configuration loading for AutoBiz using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AUTOBIZ_*` prefix, `__` as separator)
//! 2. An explicit config file (`--config`), or `./autobiz.toml`
//! 3. User-level `~/.config/autobiz/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `AUTOBIZ_LLM__MODEL` -> `llm.model`, `AUTOBIZ_SERVER__BIND` -> `server.bind`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use biz_config::BizConfig;
//!
//! let config = BizConfig::load_with_dotenv(None).expect("config");
//! if config.llm.is_configured() {
//!     println!("LLM model: {}", config.llm.model);
//! }
//! ```

mod charts;
mod error;
mod llm;
mod report;
mod server;
mod storage;

pub use charts::ChartsConfig;
pub use error::ConfigError;
pub use llm::{LlmConfig, MESSAGE_PLACEHOLDER};
pub use report::ReportConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "autobiz.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BizConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub charts: ChartsConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

impl BizConfig {
    /// Load configuration from all sources and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] when a value fails validation.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::invalid(
                    "--config",
                    format!("{} does not exist", path.display()),
                ));
            }
        }
        let config: Self = Self::figment(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: explicit file, or project-local config
        match explicit {
            Some(path) => figment = figment.merge(Toml::file_exact(path)),
            None => {
                let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
                if local_path.exists() {
                    figment = figment.merge(Toml::file(local_path));
                }
            }
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("AUTOBIZ_").split("__"))
    }

    /// Reject values that would only fail later, deep inside the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::invalid("server.bind", "must not be empty"));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::invalid(
                "server.max_upload_bytes",
                "must be greater than zero",
            ));
        }
        if self.charts.bar_width == 0 || self.charts.bar_height == 0 {
            return Err(ConfigError::invalid(
                "charts.bar_width/bar_height",
                "must be greater than zero",
            ));
        }
        if self.charts.pie_size == 0 {
            return Err(ConfigError::invalid(
                "charts.pie_size",
                "must be greater than zero",
            ));
        }
        if !(self.report.image_width_mm.is_finite() && self.report.image_width_mm > 0.0) {
            return Err(ConfigError::invalid(
                "report.image_width_mm",
                "must be a positive number",
            ));
        }
        if self.report.default_filename.trim().is_empty() {
            return Err(ConfigError::invalid(
                "report.default_filename",
                "must not be empty",
            ));
        }
        if self.llm.enabled && !self.llm.prompt_template.contains(MESSAGE_PLACEHOLDER) {
            return Err(ConfigError::invalid(
                "llm.prompt_template",
                format!("must contain the {MESSAGE_PLACEHOLDER} placeholder"),
            ));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("autobiz").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = BizConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.llm.is_configured());
        assert_eq!(config.server.bind, "127.0.0.1:8000");
    }

    #[test]
    fn figment_builds_without_files() {
        let config: BizConfig = Figment::from(Serialized::defaults(BizConfig::default()))
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.charts.pie_size, 500);
        assert_eq!(config.report.default_filename, "report.pdf");
    }

    #[test]
    fn zero_upload_cap_is_rejected() {
        let mut config = BizConfig::default();
        config.server.max_upload_bytes = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.max_upload_bytes"));
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let mut config = BizConfig::default();
        config.llm.prompt_template = "no placeholder".into();
        assert!(config.validate().is_err());

        config.llm.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_positive_image_width_is_rejected() {
        let mut config = BizConfig::default();
        config.report.image_width_mm = 0.0;
        assert!(config.validate().is_err());
    }
}

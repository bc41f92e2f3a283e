//! On-disk layout for uploads, charts and reports.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default base directory (the working directory).
fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root under which `uploads/` and `reports/` are created.
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
        }
    }
}

impl StorageConfig {
    /// `<base>/uploads`
    #[must_use]
    pub fn uploads_dir(&self) -> PathBuf {
        self.base_dir.join("uploads")
    }

    /// `<base>/reports`
    #[must_use]
    pub fn reports_dir(&self) -> PathBuf {
        self.base_dir.join("reports")
    }

    /// `<base>/reports/charts`
    #[must_use]
    pub fn charts_dir(&self) -> PathBuf {
        self.reports_dir().join("charts")
    }
}

use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ChartKind;

/// A chart image written to disk by the renderer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChartArtifact {
    pub kind: ChartKind,
    pub path: PathBuf,
}

impl ChartArtifact {
    /// Artifact for `kind` inside `dir`, using the kind's fixed file name.
    #[must_use]
    pub fn in_dir(kind: ChartKind, dir: &Path) -> Self {
        Self {
            kind,
            path: dir.join(kind.file_name()),
        }
    }
}

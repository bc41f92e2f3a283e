//! Per-request identifiers.
//!
//! Every HTTP request gets a fresh [`RequestId`]. The id prefixes the stored
//! upload, names the chart directory and the PDF, so two requests never write
//! to the same files.

use std::fmt;

use thiserror::Error;

/// Random bytes behind a request id (rendered as 16 hex characters).
const ID_BYTES: usize = 8;

#[derive(Debug, Error)]
#[error("failed to generate request id: {0}")]
pub struct IdError(String);

/// Hex-encoded random identifier, safe to embed in file names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random id from the OS entropy source.
    ///
    /// # Errors
    ///
    /// Returns [`IdError`] if the entropy source is unavailable.
    pub fn generate() -> Result<Self, IdError> {
        let mut bytes = [0u8; ID_BYTES];
        getrandom::fill(&mut bytes).map_err(|e| IdError(e.to_string()))?;
        Ok(Self(bytes.iter().map(|b| format!("{b:02x}")).collect()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix `name` with this id: `<id>-<name>`.
    #[must_use]
    pub fn prefixed(&self, name: &str) -> String {
        format!("{}-{name}", self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

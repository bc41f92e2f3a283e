//! JSON bodies of the HTTP API.
//!
//! These structs define the request/response shapes of `POST /upload/`,
//! `POST /report/`, `POST /agent/` and `GET /health`. `autobiz schema`
//! prints their JSON Schemas.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Response from `POST /upload/`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UploadResponse {
    pub insights: Vec<String>,
}

/// Response from `POST /report/`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReportResponse {
    /// PDF location relative to the storage base directory, always with
    /// forward slashes.
    pub pdf_path: String,
}

impl ReportResponse {
    /// Build a response, normalising platform separators to `/`.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Self {
            pdf_path: path.replace('\\', "/"),
        }
    }
}

/// Request body of `POST /agent/`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AgentRequest {
    pub message: String,
}

/// Response from `POST /agent/`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AgentResponse {
    pub reply: String,
}

/// Response from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

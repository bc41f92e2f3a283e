//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// Default listen address.
fn default_bind() -> String {
    String::from("127.0.0.1:8000")
}

/// Default CORS origin (any).
fn default_allowed_origin() -> String {
    String::from("*")
}

/// Default upload cap: 10 MiB.
const fn default_max_upload_bytes() -> u64 {
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Value of `Access-Control-Allow-Origin` on every response.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allowed_origin: default_allowed_origin(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

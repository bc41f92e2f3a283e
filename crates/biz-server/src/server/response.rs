//! Response bodies and headers.

use std::io::Cursor;

use biz_core::responses::ErrorResponse;
use serde::Serialize;
use tiny_http::{Header, Response};

use crate::error::ServiceError;

const JSON: &str = "application/json";
const PDF: &str = "application/pdf";
const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, X-Filename";

/// A finished response, independent of the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self {
                status,
                content_type: Some(JSON),
                body,
            },
            Err(error) => Self::error(&ServiceError::Internal(format!("serialize response: {error}"))),
        }
    }

    pub fn error(error: &ServiceError) -> Self {
        let body = ErrorResponse {
            error: error.to_string(),
        };
        Self {
            status: error.status(),
            content_type: Some(JSON),
            body: serde_json::to_vec(&body).unwrap_or_default(),
        }
    }

    pub const fn pdf(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: Some(PDF),
            body,
        }
    }

    pub const fn no_content() -> Self {
        Self {
            status: 204,
            content_type: None,
            body: Vec::new(),
        }
    }

    /// Build the wire response, adding CORS headers for `origin`.
    pub fn into_response(self, origin: &str) -> Response<Cursor<Vec<u8>>> {
        let mut response = Response::from_data(self.body).with_status_code(self.status);
        let mut headers = vec![
            ("Access-Control-Allow-Origin", origin),
            ("Access-Control-Allow-Methods", ALLOW_METHODS),
            ("Access-Control-Allow-Headers", ALLOW_HEADERS),
        ];
        if let Some(content_type) = self.content_type {
            headers.push(("Content-Type", content_type));
        }
        for (name, value) in headers {
            match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
                Ok(header) => response.add_header(header),
                Err(()) => tracing::warn!(name, value, "skipping invalid response header"),
            }
        }
        response
    }
}

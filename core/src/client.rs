//! Stateless HTTP request builder and response interpreter.
//!
//! # Design
//! `RestClient` holds only a `base_url` and carries no mutable state between
//! calls. `build_request` turns a `RequestSpec` into an `HttpRequest`;
//! `parse_response` turns the `HttpResponse` the caller obtained into a
//! decoded JSON value. The caller executes the round-trip in between.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::RequestSpec;

/// The API every invocation of the binary talks to.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Synchronous, stateless client for a JSON REST API.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
}

impl Default for RestClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl RestClient {
    /// The base URL is kept verbatim; endpoints are appended without any
    /// slash normalisation.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// GET requests never carry a body, even when the spec has a payload.
    /// POST requests always carry the JSON content type; the body is absent
    /// when no payload was given.
    pub fn build_request(&self, spec: &RequestSpec) -> Result<HttpRequest, ApiError> {
        let url = self.url_for(&spec.endpoint);
        let request = match spec.method {
            HttpMethod::Get => HttpRequest {
                method: HttpMethod::Get,
                url,
                headers: Vec::new(),
                body: None,
            },
            HttpMethod::Post => {
                let body = spec
                    .payload
                    .as_ref()
                    .map(serde_json::to_string)
                    .transpose()
                    .map_err(|e| ApiError::Serialization(e.to_string()))?;
                HttpRequest {
                    method: HttpMethod::Post,
                    url,
                    headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                    body,
                }
            }
        };
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            body_len = request.body.as_ref().map_or(0, String::len),
            "built request"
        );
        Ok(request)
    }

    /// Decode a successful response. Error bodies are returned as text in
    /// `ApiError::HttpError` and never decoded as JSON.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(response)
            .and_then(|body| serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string())))
    }
}

/// Any status outside 2xx becomes `HttpError` carrying the raw body.
/// Invalid UTF-8 in an error body is replaced rather than rejected.
fn check_status(response: HttpResponse) -> Result<Vec<u8>, ApiError> {
    if response.is_success() {
        return Ok(response.body);
    }
    tracing::warn!(status = response.status, "server returned an error status");
    Err(ApiError::HttpError {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}

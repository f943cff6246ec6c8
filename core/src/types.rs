//! The validated description of the single request an invocation performs.

use std::path::PathBuf;

use serde_json::Value;

use crate::http::HttpMethod;

/// What to send and where to put the answer.
///
/// Constructed once from the command line and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    /// URI fragment appended verbatim to the base URL.
    pub endpoint: String,
    /// JSON body for POST. Ignored for GET.
    pub payload: Option<Value>,
    /// Destination file; `None` prints to stdout.
    pub output: Option<PathBuf>,
}

impl RequestSpec {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            endpoint: endpoint.into(),
            payload: None,
            output: None,
        }
    }

    pub fn post(endpoint: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            method: HttpMethod::Post,
            endpoint: endpoint.into(),
            payload,
            output: None,
        }
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }
}

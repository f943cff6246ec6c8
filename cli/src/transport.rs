//! Executes `HttpRequest` values against the network.
//!
//! `Transport` is the seam between the pipeline and real I/O; `run` only
//! sees the trait, so tests substitute a recording fake.

use restful_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};
use ureq::Agent;

/// Performs exactly one round-trip per call.
pub trait Transport {
    /// Non-2xx statuses are returned as data; only failures to obtain a
    /// response at all are errors.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a `ureq` agent.
///
/// No timeout is configured: a call blocks until the connection completes
/// or the OS reports a failure.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        // ureq caps bodies at 10 MiB by default; the response is read whole.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        tracing::debug!(status, body_len = body.len(), "received response");
        Ok(HttpResponse { status, body })
    }
}

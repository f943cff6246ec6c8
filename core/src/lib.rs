//! Synchronous request/response core for the `restful` command-line client.
//!
//! # Overview
//! Builds `HttpRequest` values and interprets `HttpResponse` values without
//! touching the network (host-does-IO pattern). The binary crate executes the
//! actual HTTP round-trip, so everything here is deterministic and testable.
//!
//! # Design
//! - `RestClient` is stateless: it holds only `base_url`.
//! - A request goes through `build_request` (produces the request) and
//!   `parse_response` (consumes the response), so the I/O boundary is explicit.
//! - Decoded bodies stay as `serde_json::Value`; the API is schemaless.
//! - `output` persists a decoded body as pretty JSON or CSV.

pub mod client;
pub mod error;
pub mod http;
pub mod output;
pub mod types;

pub use client::{RestClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use output::{to_pretty_json, write_output, CsvTable, OutputFormat};
pub use types::RequestSpec;

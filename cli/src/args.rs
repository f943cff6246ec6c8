//! CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use restful_core::{ApiError, HttpMethod, RequestSpec};
use serde_json::Value;

/// Send one request to JSONPlaceholder and show the JSON reply.
#[derive(Debug, Parser)]
#[command(
    name = "restful",
    about = "Simple REST client for JSONPlaceholder",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Request method.
    #[arg(value_enum, ignore_case = true)]
    pub method: MethodArg,

    /// Request endpoint URI fragment, appended verbatim to the base URL.
    /// Example: /posts/1
    pub endpoint: String,

    /// JSON data to send with the request (POST only; ignored for GET).
    #[arg(short = 'd', long = "data", value_name = "JSON", value_parser = parse_payload)]
    pub data: Option<Value>,

    /// Write the response to a .json or .csv file instead of stdout.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Get,
    Post,
}

impl From<MethodArg> for HttpMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Get => HttpMethod::Get,
            MethodArg::Post => HttpMethod::Post,
        }
    }
}

impl Cli {
    /// The payload is dropped for GET so it can never reach the wire.
    #[must_use]
    pub fn into_spec(self) -> RequestSpec {
        let method = HttpMethod::from(self.method);
        let payload = match method {
            HttpMethod::Post => self.data,
            HttpMethod::Get => None,
        };
        RequestSpec {
            method,
            endpoint: self.endpoint,
            payload,
            output: self.output,
        }
    }
}

/// Turn a clap usage error (bad method, malformed `--data`, missing
/// endpoint) into `ApiError::InvalidArgument`, keeping clap's message.
#[must_use]
pub fn invalid_argument(err: &clap::Error) -> ApiError {
    ApiError::InvalidArgument(err.render().to_string().trim_end().to_string())
}

/// Parse `--data` eagerly so malformed JSON is rejected before dispatch.
fn parse_payload(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))
}

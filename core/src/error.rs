//! Error types for the REST client.
//!
//! # Design
//! Every variant is terminal: the binary prints the `Display` text as a single
//! diagnostic line and exits. The messages therefore double as the user-facing
//! output (`Request failed: ...`, `Error: ...`).

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while building, executing, or persisting a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A command-line value was rejected before any request was sent.
    /// Holds the rendered usage message.
    #[error("{0}")]
    InvalidArgument(String),

    /// The method is neither GET nor POST.
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// DNS, connection, TLS or body-read failure while talking to the server.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status. `body` is the raw text.
    #[error("Error: {body}")]
    HttpError { status: u16, body: String },

    /// A 2xx response whose body is not valid JSON.
    #[error("Invalid JSON in response body: {0}")]
    Decode(String),

    /// The request payload or the decoded body could not be encoded.
    #[error("JSON encoding failed: {0}")]
    Serialization(String),

    /// The output path has neither a `.json` nor a `.csv` extension.
    #[error("Unsupported file format. Use .json or .csv")]
    UnsupportedOutputFormat(PathBuf),

    /// The decoded body cannot be laid out as CSV rows.
    #[error("Cannot write CSV: {0}")]
    CsvShape(String),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl ApiError {
    /// Process exit code for this error. Every failure maps to 1.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        1
    }
}

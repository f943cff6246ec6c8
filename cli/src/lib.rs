//! The `restful` command-line client.
//!
//! # Overview
//! Parses the command line into a `RequestSpec`, executes it with a blocking
//! `ureq` transport, and prints or saves the decoded JSON. Request building,
//! status checks and output formats live in `restful-core`; this crate owns
//! argument parsing, the network, and the process-facing output.

pub mod args;
pub mod logging;
pub mod run;
pub mod transport;

pub use args::{invalid_argument, Cli, MethodArg};
pub use run::run;
pub use transport::{Transport, UreqTransport};

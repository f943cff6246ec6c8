//! The request pipeline: build, execute, check, print or save.

use std::io::Write;

use restful_core::{to_pretty_json, write_output, ApiError, RequestSpec, RestClient};

use crate::transport::Transport;

/// Run one invocation.
///
/// The status line is written to `out` before the status is checked, so it
/// appears for error responses too. Every failure is returned; nothing is
/// retried.
///
/// # Errors
///
/// Returns the first `ApiError` hit along the pipeline.
pub fn run<T, W>(
    spec: &RequestSpec,
    client: &RestClient,
    transport: &T,
    out: &mut W,
) -> Result<(), ApiError>
where
    T: Transport + ?Sized,
    W: Write,
{
    let request = client.build_request(spec)?;
    let response = transport.execute(&request)?;

    writeln!(out, "HTTP Status Code: {}", response.status)?;
    let value = client.parse_response(response)?;

    match &spec.output {
        Some(path) => {
            write_output(&value, path)?;
            writeln!(out, "Response saved to {}", path.display())?;
        }
        None => writeln!(out, "{}", to_pretty_json(&value)?)?,
    }
    out.flush()?;
    Ok(())
}

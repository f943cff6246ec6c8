//! restful: send one GET or POST to JSONPlaceholder and print or save the reply.

use std::io::Write;

use clap::Parser;

use restful::{invalid_argument, logging, run, Cli, UreqTransport};
use restful_core::RestClient;

fn main() {
    // Usage errors exit with 1 rather than clap's default 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            std::process::exit(0);
        }
        Err(err) => {
            let err = invalid_argument(&err);
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    };
    logging::init_tracing();

    let spec = cli.into_spec();
    let client = RestClient::default();
    let transport = UreqTransport::new();

    let mut stdout = std::io::stdout().lock();
    if let Err(err) = run(&spec, &client, &transport, &mut stdout) {
        let _ = stdout.flush();
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}

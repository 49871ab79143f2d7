//! portfleet - provision one service instance per port

use std::process::ExitCode;

use clap::Parser;

use portfleet_cli::cli::Cli;
use portfleet_cli::domain::report::Outcome;
use portfleet_cli::logging;
use portfleet_cli::output::json;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let json_mode = cli.json;

    match cli.run().await {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            let outcome = Outcome::from_error(&e);
            let message = format!("{e:#}");
            match json_mode.then(|| json::format_error(&message, outcome.label())) {
                Some(Ok(body)) => println!("{body}"),
                _ => eprintln!("Error: {message}"),
            }
            outcome.into()
        }
    }
}

use std::process;

use clap::Parser;
use failure::Error;
use tracing::error;
use tracing_subscriber::EnvFilter;

use gitlab::Client;
use gitlab_cli::{run, Cli};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = execute(&cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn execute(cli: &Cli) -> Result<(), Error> {
    let client = Client::new(cli.config()?)?;
    let out = run(cli, &client)?;
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

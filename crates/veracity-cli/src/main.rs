//! Veracity CLI - Command-line interface for the Veracity fact-checking pipeline.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use veracity_cli::commands;
use veracity_cli::{AppConfig, Cli, Command, Formatter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> veracity_cli::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let formatter = Formatter::new(cli.format, !cli.no_color);

    match cli.command {
        Command::Verify(args) => commands::execute_verify(args, &config, &formatter).await?,
        Command::Reputation(args) => commands::execute_reputation(args, &formatter)?,
        Command::Cache(args) => commands::execute_cache(args, &config, &formatter)?,
        Command::Config => println!("{}", config.to_redacted_toml()?),
    }

    Ok(())
}

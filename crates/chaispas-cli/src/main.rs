use std::time::Duration;

use anyhow::Context;
use chaispas_core::impls::JsonFileLogStore;
use chaispas_core::{DecisionSession, ErrorKind};
use clap::Parser;

mod cli;
mod config;
mod output;

use cli::{Cli, Commands, OutputFormat};
use config::ChaispasConfig;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("chaispas error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = ChaispasConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let store = JsonFileLogStore::new(config.storage_path());
    tracing::debug!(path = %store.path().display(), "opening decision log");

    let mut session = DecisionSession::builder(store)
        .limits(config.analytics)
        .open();
    if let Some(error) = session.load_error() {
        eprintln!("warning: could not read saved decisions ({error}); starting with an empty log");
        match session.store().back_up() {
            Ok(Some(backup)) => eprintln!("warning: previous log kept at {}", backup.display()),
            Ok(None) => {}
            Err(error) => tracing::warn!(%error, "could not back up unreadable decision log"),
        }
    }

    match cli.command {
        Commands::Decide { choices, delay_ms } => {
            for text in &choices {
                session.add_choice(text)?;
            }
            let pending = session.begin()?;
            let delay = delay_ms.unwrap_or(config.decide.reveal_delay_ms);
            if delay > 0 {
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }

            let record = match session.reveal(pending) {
                Ok(record) => record,
                Err(error) if error.kind() == ErrorKind::StorageUnavailable => {
                    eprintln!("warning: decision not saved: {error}");
                    session
                        .log()
                        .latest()
                        .cloned()
                        .context("decision missing from the in-memory log")?
                }
                Err(error) => return Err(error.into()),
            };

            match cli.format {
                OutputFormat::Text => println!("{}", output::decision_text(&record)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
            }
        }
        Commands::Stats => {
            let summary = session.summary();
            match cli.format {
                OutputFormat::Text => print!("{}", output::summary_text(&summary)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            }
        }
        Commands::History { limit } => {
            let limit = limit.unwrap_or(session.limits().timeline);
            let records = chaispas_core::analytics::timeline(session.log(), limit);
            match cli.format {
                OutputFormat::Text => print!("{}", output::history_text(&records)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
            }
        }
        Commands::Export { out } => {
            let json = session.export()?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    if !cli.quiet {
                        eprintln!("exported {} decisions to {}", session.log().len(), path.display());
                    }
                }
                None => println!("{json}"),
            }
        }
        Commands::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let kept = session.import(&text)?;
            if !cli.quiet {
                eprintln!("imported {kept} decisions");
            }
        }
        Commands::Clear => {
            session.clear()?;
            if !cli.quiet {
                eprintln!("decision log cleared");
            }
        }
    }

    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CHAISPAS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

//! Taskbreak CLI entry point

use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use taskbreak::classifier;
use taskbreak::cli::{Cli, OutputFormat};
use taskbreak::config::Config;
use taskbreak::format;
use taskbreak::orchestrator::Orchestrator;
use taskbreak::strategy::{BreakdownStrategy, RemoteModelStrategy, TemplateStrategy};

/// Logs go to stderr; stdout is reserved for the rendered breakdown.
fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let task = classifier::classify(&cli.task);
    info!(category = %task.category, scope = %task.scope, "task classified");

    let strategy: Arc<dyn BreakdownStrategy> = if cli.remote {
        let resolved = config
            .llm
            .resolve()
            .context("Remote strategy is not configured")?;
        Arc::new(RemoteModelStrategy::from_config(&resolved).context("Failed to construct remote strategy")?)
    } else {
        Arc::new(TemplateStrategy::new())
    };
    debug!(strategy = strategy.name(), "strategy selected");

    let orchestrator = Orchestrator::new(strategy);
    let breakdown = orchestrator
        .analyze(&task)
        .await
        .context("Failed to break the task down")?;

    match cli.format {
        OutputFormat::Text => print!("{}", format::render_text(&task, &breakdown)),
        OutputFormat::Json => println!("{}", format::render_json(&task, &breakdown)?),
    }

    Ok(())
}

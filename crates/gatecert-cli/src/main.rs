//! gatecert CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use gatecert_core::GatecertConfig;
use tokio_util::sync::CancellationToken;

mod cli;
mod commands;
mod ui;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = GatecertConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let _guard = gatecert_core::log::init(&settings.log, cli.log_level())
        .context("Failed to initialize logging")?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    cli.execute(&settings, cancel).await
}

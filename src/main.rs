mod agent;
mod catalogue;
mod cli;
mod client;
mod config;
mod dispatch;
mod error;
mod forecast;
mod request;
mod sanitize;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::catalogue::TemplateCatalogue;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    let catalogue =
        TemplateCatalogue::standard().context("Built-in prompt templates failed validation")?;
    cli.run(Arc::new(catalogue)).await
}

/// Logs go to stderr so stdout carries only the plan. `--verbose` wins over `RUST_LOG`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("tripmate=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tripmate=info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

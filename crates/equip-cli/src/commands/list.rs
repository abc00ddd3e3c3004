//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::backend;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the records as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ListArgs, config: &Config) -> Result<()> {
    let api = backend::connect(config)?;

    let records = api.list().await.context("Failed to list equipment")?;

    if args.json {
        return output::json_pretty(&records);
    }

    if records.is_empty() {
        eprintln!("{}", "No equipment registered.".dimmed());
        return Ok(());
    }

    output::table(&records);

    Ok(())
}

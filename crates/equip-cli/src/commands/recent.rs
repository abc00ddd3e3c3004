//! Recent command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::config::Config;
use crate::history;
use crate::output;

#[derive(Args, Debug)]
pub struct RecentArgs {
    /// Print the ids as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: RecentArgs, config: &Config) -> Result<()> {
    let mut ids = history::load(&config.api).context("Failed to load history")?;
    ids.truncate(config.recent_limit);

    if args.json {
        return output::json_pretty(&ids);
    }

    if ids.is_empty() {
        eprintln!("{}", "No recently viewed equipment.".dimmed());
        return Ok(());
    }

    for id in &ids {
        println!("{}", id);
    }

    Ok(())
}

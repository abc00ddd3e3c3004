//! Create command implementation.

use anyhow::{Context, Result};
use clap::Args;

use equip_core::NewEquipment;

use super::form::{self, FieldArgs};
use crate::backend;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub fields: FieldArgs,

    /// JSON file with the record fields (use - for stdin)
    #[arg(long, value_name = "FILE")]
    pub json: Option<String>,
}

pub async fn run(args: CreateArgs, config: &Config) -> Result<()> {
    let equipment: NewEquipment = match &args.json {
        Some(path) => {
            anyhow::ensure!(args.fields.is_empty(), "--json cannot be combined with field flags");
            form::read_json(path)?
        }
        None => args.fields.into_new()?,
    };

    let api = backend::connect(config)?;

    let record = api
        .create(&equipment)
        .await
        .context("Failed to create equipment")?;

    println!("{}", record.id);

    Ok(())
}

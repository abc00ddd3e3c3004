//! Edit command implementation.

use anyhow::{Context, Result};
use clap::Args;

use equip_core::{EquipmentId, EquipmentPatch};

use super::form::{self, FieldArgs};
use crate::backend;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Equipment id
    pub id: EquipmentId,

    #[command(flatten)]
    pub fields: FieldArgs,

    /// JSON file with the fields to change (use - for stdin)
    #[arg(long, value_name = "FILE")]
    pub json: Option<String>,
}

pub async fn run(args: EditArgs, config: &Config) -> Result<()> {
    let patch: EquipmentPatch = match &args.json {
        Some(path) => {
            anyhow::ensure!(args.fields.is_empty(), "--json cannot be combined with field flags");
            form::read_json(path)?
        }
        None => args.fields.into_patch(),
    };

    anyhow::ensure!(!patch.is_empty(), "Nothing to update: pass at least one field");

    let api = backend::connect(config)?;

    let record = api
        .update(&args.id, &patch)
        .await
        .with_context(|| format!("Failed to update equipment {}", args.id))?;

    println!();
    output::equipment(&record);

    Ok(())
}

//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use equip_core::EquipmentId;

use crate::backend;
use crate::config::Config;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Equipment id
    pub id: EquipmentId,
}

pub async fn run(args: DeleteArgs, config: &Config) -> Result<()> {
    let api = backend::connect(config)?;

    api.remove(&args.id)
        .await
        .with_context(|| format!("Failed to delete equipment {}", args.id))?;

    Ok(())
}

//! Show command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use equip_core::{DetailView, EquipmentId, EquipmentStore};

use crate::backend;
use crate::config::Config;
use crate::history;
use crate::output;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Equipment id
    pub id: EquipmentId,

    /// Print the record as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ShowArgs, config: &Config) -> Result<()> {
    let api = Arc::new(backend::connect(config)?);

    let store = EquipmentStore::with_capacity(config.recent_limit);
    store.restore(history::load(&config.api).context("Failed to load history")?);

    let view = DetailView::mount(api, store.clone());
    let loaded = view.load(&args.id).await;
    let selected = store.selected_equipment();
    view.unmount();

    loaded.with_context(|| format!("Failed to load equipment {}", args.id))?;
    let record = selected.context("Loaded record was not selected")?;

    history::save(&config.api, &store.recently_viewed_ids()).context("Failed to save history")?;
    debug!(id = %record.id, "Recorded view");

    if args.json {
        return output::json_pretty(&record);
    }

    output::equipment(&record);

    Ok(())
}

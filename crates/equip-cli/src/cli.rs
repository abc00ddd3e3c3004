//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{create, delete, edit, list, recent, show};

/// Equipment inventory client.
#[derive(Parser, Debug)]
#[command(name = "equip")]
#[command(author, version = env!("EQUIP_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// API base URL (http://, https:// or file://). Overrides EQUIP_API_BASE_URL
    #[arg(long, global = true, value_name = "URL")]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all equipment
    List(list::ListArgs),

    /// Show one record and add it to the recently viewed list
    Show(show::ShowArgs),

    /// Register new equipment
    Create(create::CreateArgs),

    /// Update fields of existing equipment
    Edit(edit::EditArgs),

    /// Delete equipment
    Delete(delete::DeleteArgs),

    /// List recently viewed equipment ids, most recent first
    Recent(recent::RecentArgs),
}

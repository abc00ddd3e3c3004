//! Command implementations.

pub mod create;
pub mod delete;
pub mod edit;
pub mod list;
pub mod recent;
pub mod show;

mod form;

use anyhow::Result;

use crate::cli::Commands;
use crate::config::Config;

pub async fn handle(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::List(args) => list::run(args, config).await,
        Commands::Show(args) => show::run(args, config).await,
        Commands::Create(args) => create::run(args, config).await,
        Commands::Edit(args) => edit::run(args, config).await,
        Commands::Delete(args) => delete::run(args, config).await,
        Commands::Recent(args) => recent::run(args, config).await,
    }
}

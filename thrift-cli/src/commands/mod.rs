pub mod comps;
pub mod db;
pub mod export;
pub mod item;
pub mod listing;
pub mod photo;
pub mod pipeline;
pub mod pricing;

use crate::cli::Commands;
use crate::AppContext;
use anyhow::anyhow;
use thrift_catalog::repository::ItemRepository;
use thrift_catalog::InventoryItem;
use thrift_core::CoreError;

pub async fn dispatch(command: Commands, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        Commands::Db(_) => unreachable!("db commands are handled before context setup"),
        Commands::Item(cmd) => item::run(cmd, ctx).await,
        Commands::Pricing(cmd) => pricing::run(cmd, ctx).await,
        Commands::Listing(cmd) => listing::run(cmd, ctx).await,
        Commands::Photo(cmd) => photo::run(cmd, ctx).await,
        Commands::Comps(cmd) => comps::run(cmd, ctx).await,
        Commands::Export(cmd) => export::run(cmd, ctx).await,
        Commands::Pipeline(cmd) => pipeline::run(cmd, ctx).await,
    }
}

/// Convert repository boxed errors into anyhow errors.
pub(crate) fn repo_err(err: Box<dyn std::error::Error + Send + Sync>) -> anyhow::Error {
    anyhow!("{}", err)
}

/// Fetch an item or fail the command with the canonical not-found message.
pub(crate) async fn require_item(ctx: &AppContext, sku: &str) -> anyhow::Result<InventoryItem> {
    let normalized = thrift_core::sku::normalize(sku)?;
    match ctx
        .items
        .get_item_by_sku(&normalized)
        .await
        .map_err(repo_err)?
    {
        Some(item) => Ok(item),
        None => Err(CoreError::ItemNotFound(normalized).into()),
    }
}

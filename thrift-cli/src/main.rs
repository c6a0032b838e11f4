mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use std::sync::Arc;
use thrift_listing::ai::AiClientConfig;
use thrift_listing::{ChatCompletionClient, ListingGenerator};
use thrift_pricing::PricingAnalyzer;
use thrift_store::app_config::Config;
use thrift_store::{DbClient, SqliteComparableRepository, SqliteItemRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "thrift_cli=info,thrift_pricing=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(err) = run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let args = Cli::parse();
    let config = Config::load()?;

    let db = DbClient::new(&config.database.url).await?;

    if let Commands::Db(cmd) = &args.command {
        return commands::db::run(cmd, &db).await;
    }

    let ctx = build_context(config, db);
    commands::dispatch(args.command, &ctx).await
}

/// Everything command handlers need, wired once at startup.
pub struct AppContext {
    pub config: Config,
    pub items: Arc<SqliteItemRepository>,
    pub analyzer: PricingAnalyzer,
    pub generator: ListingGenerator,
}

fn build_context(config: Config, db: DbClient) -> AppContext {
    let items = Arc::new(SqliteItemRepository::new(db.pool.clone()));
    let comparables = Arc::new(SqliteComparableRepository::new(db.pool.clone()));
    let analyzer = PricingAnalyzer::new(comparables, config.fees.clone());

    let completion = config.ai.api_key.clone().and_then(|key| {
        if AiClientConfig::is_placeholder_key(key.expose()) {
            tracing::warn!("AI key looks like a placeholder, using template content");
            return None;
        }
        let client_config = AiClientConfig {
            api_key: key,
            base_url: config.ai.base_url.clone(),
            model: config.ai.model.clone(),
        };
        ChatCompletionClient::new(client_config)
            .map(|client| Arc::new(client) as Arc<dyn thrift_core::completion::TextCompletion>)
            .ok()
    });

    AppContext {
        config,
        items,
        analyzer,
        generator: ListingGenerator::new(completion),
    }
}

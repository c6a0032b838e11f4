use crate::cli::DbCommands;
use thrift_store::DbClient;

pub async fn run(command: &DbCommands, db: &DbClient) -> anyhow::Result<()> {
    match command {
        DbCommands::Init => {
            db.init_schema().await?;
            println!("Database initialized successfully");
            Ok(())
        }
    }
}

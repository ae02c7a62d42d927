use anyhow::Context;

use crate::config::AppConfig;
use crate::database::DatabaseManager;

pub async fn handle() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;

    DatabaseManager::ensure_schema(&pool)
        .await
        .context("failed to create tables")?;
    DatabaseManager::close(&pool).await;

    println!("Tables Actor, Movie and Casting are ready");
    Ok(())
}

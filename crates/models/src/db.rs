use std::time::Duration;

use configs::DatabaseConfig;
use once_cell::sync::Lazy;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// `DATABASE_URL` from the environment (after loading `.env`), if any.
pub static DATABASE_URL: Lazy<Option<String>> = Lazy::new(|| {
    let _ = dotenvy::dotenv();
    std::env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty())
});

/// Open a pooled connection using the validated database section of the app config.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    info!(max = cfg.max_connections, min = cfg.min_connections, "database pool ready");
    Ok(db)
}

/// Connect with default pool settings to `DATABASE_URL`.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let url = DATABASE_URL
        .clone()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
    let cfg = DatabaseConfig { url, ..Default::default() };
    connect_with_config(&cfg).await
}

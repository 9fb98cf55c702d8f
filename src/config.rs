use serde::Deserialize;

/// Runtime configuration, loaded from the environment (a `.env` file is
/// honored when present).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub max_db_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DATABASE_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            max_db_connections: std::env::var("MAX_DB_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("MAX_DB_CONNECTIONS must be a positive number"))?,
        };

        // Log successful configuration load (without sensitive values).
        // Truncate by characters, not bytes: credentials may be multibyte.
        let url_preview: String = config.database_url.chars().take(20).collect();
        tracing::debug!("Database URL: {}...", url_preview);
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!("Max DB connections: {}", config.max_db_connections);

        Ok(config)
    }
}

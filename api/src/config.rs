use std::env;

/// Feed length when the client does not ask for one
pub const DEFAULT_FEED_LIMIT: u64 = 10;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// ClickHouse URL for usage events; events are only logged when unset
    pub clickhouse_url: Option<String>,
    /// HMAC key mixed into every password hash
    pub password_pepper: String,
    pub port: u16,
    pub feed_limit: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            clickhouse_url: env::var("CLICKHOUSE_URL").ok().filter(|s| !s.is_empty()),
            password_pepper: env::var("PASSWORD_PEPPER").unwrap_or_else(|_| {
                tracing::warn!("PASSWORD_PEPPER not set, using development value");
                "dev-pepper-not-for-production".to_string()
            }),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            feed_limit: env::var("FEED_LIMIT")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(DEFAULT_FEED_LIMIT),
        }
    }

    /// Check if usage events are shipped to ClickHouse
    pub fn clickhouse_enabled(&self) -> bool {
        self.clickhouse_url.is_some()
    }
}

use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Deployment environment ("development", "staging", "production").
    /// Anything other than "development" makes index-sync failures abort
    /// resource mutations instead of being logged and tolerated.
    pub app_env: String,
    pub algolia_app_id: Option<String>,
    pub algolia_api_key: Option<String>,
    pub algolia_index: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            algolia_app_id: env::var("ALGOLIA_APP_ID").ok(),
            algolia_api_key: env::var("ALGOLIA_API_KEY").ok(),
            algolia_index: env::var("ALGOLIA_INDEX").unwrap_or_else(|_| "resources".to_string()),
        })
    }

    /// Whether a failed index update should abort the surrounding mutation.
    pub fn strict_index_sync(&self) -> bool {
        self.app_env != "development"
    }
}

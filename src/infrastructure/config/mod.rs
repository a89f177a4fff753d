use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Unsplash catalog
    pub unsplash_access_key: String,
    pub unsplash_api_url: String,
    // Gallery
    pub page_size: u32,
    pub order_by: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://photo-gallery.db".to_string()),
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            unsplash_access_key: env::var("UNSPLASH_ACCESS_KEY")?,
            unsplash_api_url: env::var("UNSPLASH_API_URL")
                .unwrap_or_else(|_| "https://api.unsplash.com".to_string()),
            page_size: env::var("GALLERY_PAGE_SIZE")
                .unwrap_or_else(|_| "20".to_string())
                .parse()?,
            order_by: env::var("GALLERY_ORDER_BY").unwrap_or_else(|_| "latest".to_string()),
        };

        if config.page_size == 0 {
            return Err("GALLERY_PAGE_SIZE must be positive".into());
        }

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

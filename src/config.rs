use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub tmdb: TmdbConfig,
}

/// Everything the lookup client needs; an empty `api_key` selects mock data.
#[derive(Clone, Debug)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    pub language: String,
    pub rps: u32,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            language: "en-US".to_string(),
            rps: 4,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());

        let defaults = TmdbConfig::default();
        let tmdb = TmdbConfig {
            api_key: std::env::var("TMDB_API_KEY").unwrap_or_default(),
            base_url: std::env::var("TMDB_BASE_URL").unwrap_or(defaults.base_url),
            image_base_url: std::env::var("TMDB_IMAGE_BASE_URL")
                .unwrap_or(defaults.image_base_url),
            language: std::env::var("TMDB_LANGUAGE").unwrap_or(defaults.language),
            rps: std::env::var("TMDB_RPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.rps),
        };

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            tmdb,
        })
    }
}

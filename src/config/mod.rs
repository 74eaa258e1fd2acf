use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

fn default_export_dir() -> String {
    "exports".to_string()
}

/// Application configuration, read from the environment.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,
    /// Directory invoice documents are exported into
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
}

impl Config {
    /// Read a .env file if one exists, then deserialize the environment.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Load configuration at startup
pub fn init() -> Result<Config> {
    Config::load()
}

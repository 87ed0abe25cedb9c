use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_EXPLORER_API_URL: &str = "https://api-sepolia.etherscan.io/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub explorer_api_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let api_key = std::env::var("API_KEY").context("API_KEY must be set in .env")?;

        let explorer_api_url = std::env::var("EXPLORER_API_URL")
            .unwrap_or_else(|_| DEFAULT_EXPLORER_API_URL.to_string());

        let request_timeout = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(secs) => secs
                .parse::<u64>()
                .context("Invalid REQUEST_TIMEOUT_SECS format")?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Config {
            api_key,
            explorer_api_url,
            request_timeout: Duration::from_secs(request_timeout),
        })
    }
}

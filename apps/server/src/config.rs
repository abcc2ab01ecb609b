use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use tradechat_market_data::{ProviderKind, ProviderSettings, DEFAULT_MODEL_NAME, DEFAULT_QUOTE_TTL};

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// `mock`, `openai`/`llm`, anything else selects the multi-source feed
    pub data_provider: String,
    pub model_name: String,
    pub openai_api_key: Option<String>,
    pub quote_ttl: Duration,
    pub feed_backoff: Duration,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: "./db/trades.db".to_string(),
            cors_allow: split_origins(DEFAULT_CORS_ORIGINS),
            request_timeout: Duration::from_millis(30_000),
            data_provider: "yahoo".to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            openai_api_key: None,
            quote_ttl: DEFAULT_QUOTE_TTL,
            feed_backoff: Duration::from_millis(1200),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("TC_LISTEN_ADDR") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("Invalid TC_LISTEN_ADDR: {}", value))?,
            Err(_) => defaults.listen_addr,
        };
        let db_path = std::env::var("TC_DB_PATH").unwrap_or(defaults.db_path);
        let cors_allow = std::env::var("TC_CORS_ALLOW_ORIGINS")
            .map(|v| split_origins(&v))
            .unwrap_or(defaults.cors_allow);
        let request_timeout = env_millis("TC_REQUEST_TIMEOUT_MS").unwrap_or(defaults.request_timeout);
        let data_provider = std::env::var("TC_DATA_PROVIDER").unwrap_or(defaults.data_provider);
        let model_name = std::env::var("TC_MODEL_NAME")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(defaults.model_name);
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let quote_ttl = std::env::var("TC_QUOTE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.quote_ttl);
        let feed_backoff = env_millis("TC_FEED_BACKOFF_MS").unwrap_or(defaults.feed_backoff);
        let log_format = std::env::var("TC_LOG_FORMAT").unwrap_or(defaults.log_format);

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout,
            data_provider,
            model_name,
            openai_api_key,
            quote_ttl,
            feed_backoff,
            log_format,
        })
    }

    /// Provider-selection part of the configuration.
    pub fn provider_settings(&self) -> ProviderSettings {
        ProviderSettings {
            kind: ProviderKind::parse(&self.data_provider),
            model_name: self.model_name.clone(),
            api_key: self.openai_api_key.clone(),
            feed_backoff: self.feed_backoff,
        }
    }
}

fn split_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_millis(key: &str) -> Option<Duration> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
}

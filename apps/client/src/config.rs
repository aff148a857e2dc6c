use anyhow::{Context, Result};

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address of the remote customization service.
    pub api_endpoint: String,
    /// Optional request timeout in seconds. Unset preserves the open-ended
    /// wait of the original client: a silent upstream hangs the request.
    pub request_timeout_secs: Option<u64>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_endpoint: require_env("ZENCV_API_ENDPOINT")?,
            request_timeout_secs: match std::env::var("ZENCV_REQUEST_TIMEOUT_SECS") {
                Ok(raw) => Some(
                    raw.parse::<u64>()
                        .context("ZENCV_REQUEST_TIMEOUT_SECS must be a number of seconds")?,
                ),
                Err(_) => None,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;

/// Production endpoint serving the sales-transaction dataset.
pub const DEFAULT_BASE_URL: &str = "https://labdados.com/produtos";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Remote endpoint settings resolved from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Initializes the application configuration.
///
/// Reads `SALES_API_URL` and `SALES_API_TIMEOUT_SECS`, falling back to the
/// production endpoint and a network-default timeout.
pub fn init_app_config() -> color_eyre::eyre::Result<ApiConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let base_url = env::var("SALES_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    if base_url.trim().is_empty() {
        return Err(eyre!("SALES_API_URL must not be empty"));
    }

    let timeout_secs = match env::var("SALES_API_TIMEOUT_SECS") {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|_| eyre!("SALES_API_TIMEOUT_SECS must be an integer, got {raw:?}"))?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };

    Ok(ApiConfig {
        base_url,
        timeout_secs,
    })
}

/// Whether debug logging is enabled.
pub fn debug_enabled() -> bool {
    env::var("DEBUG").is_ok_and(|value| value == "1")
}

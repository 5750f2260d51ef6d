pub mod settings;

pub use settings::Config;

use crate::error::WpError;
use std::sync::Arc;
use url::Url;

/// Loads and returns the application configuration as an `Arc<Config>`.
/// Centralizes dotenv handling and validation so the binary has one
/// entry point for settings.
pub fn load_config() -> Result<Arc<Config>, WpError> {
    dotenv::dotenv().ok(); // Load .env file if present, ignore errors

    let config = Config::from_env();

    if config.api_base_url.is_empty() {
        return Err(WpError::Config("WP_API_URL cannot be empty".to_string()));
    }
    Url::parse(&config.api_base_url)
        .map_err(|e| WpError::Config(format!("WP_API_URL is not a valid URL: {}", e)))?;

    config.validate_and_log();

    Ok(Arc::new(config))
}

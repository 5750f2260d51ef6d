use std::env;

/// Defaults match the production deployment of the site.
const DEFAULT_API_BASE_URL: &str = "https://koenvandemeent.nl/wp-json";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
const DEFAULT_PER_PAGE: u32 = 100;
const DEFAULT_PREFETCH_DELAY_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub cache_ttl_secs: u64,
    pub request_timeout_ms: u64,
    pub per_page: u32,
    pub prefetch_delay_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            api_base_url: env::var("WP_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            cache_ttl_secs: env::var("WP_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            request_timeout_ms: env::var("WP_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
            per_page: env::var("WP_PER_PAGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PER_PAGE),
            prefetch_delay_ms: env::var("WP_PREFETCH_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PREFETCH_DELAY_MS),
        }
    }

    pub fn validate_and_log(&self) {
        log::info!("Application Configuration Loaded: {:?}", self);
        if self.cache_ttl_secs == 0 {
            log::warn!("WP_CACHE_TTL_SECS is 0; every fetch will hit the backend.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_deployment() {
        // Only inspect the compiled defaults; reading real env vars here
        // would make the test order-dependent.
        assert_eq!(DEFAULT_CACHE_TTL_SECS, 300);
        assert_eq!(DEFAULT_PER_PAGE, 100);
        assert!(DEFAULT_API_BASE_URL.ends_with("/wp-json"));
    }
}

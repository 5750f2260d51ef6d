use thiserror::Error;

/// Error taxonomy for the content engine.
///
/// The public client API never surfaces these across its degrade boundary
/// (failed fetches collapse to empty sequences or absent values), but the
/// internal layers keep the failure kinds distinct so log lines can name
/// what actually went wrong.
#[derive(Debug, Clone, Error)]
pub enum WpError {
    /// Transport/connectivity failures (DNS, TLS, timeouts, resets)
    #[error("Transport Error: {0}")]
    Transport(String),

    /// Backend answered with a non-success HTTP status
    #[error("HTTP Status {0}")]
    Status(u16),

    /// Response body did not match the expected wire format
    #[error("Parse Error: {0}")]
    Parse(String),

    /// A single-resource lookup matched nothing
    #[error("Not Found: {0}")]
    NotFound(String),

    /// Configuration errors (bad base URL, unbuildable HTTP client)
    #[error("Config Error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for WpError {
    fn from(err: serde_json::Error) -> Self {
        WpError::Parse(format!("JSON deserialization error: {}", err))
    }
}

impl From<reqwest::Error> for WpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WpError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            WpError::Status(status.as_u16())
        } else {
            WpError::Transport(err.to_string())
        }
    }
}

impl WpError {
    /// Whether an immediate retry could plausibly succeed.
    ///
    /// The engine itself never retries (a failed fetch is simply not
    /// cached, so the next caller tries again), but the classification
    /// keeps degraded-fetch log lines honest about the failure kind.
    pub fn is_transient(&self) -> bool {
        match self {
            WpError::Transport(_) => true,
            WpError::Status(status) => *status >= 500 || *status == 429,
            WpError::Parse(_) => false,  // wire format issues need a code fix
            WpError::NotFound(_) => false,
            WpError::Config(_) => false, // config needs fixing
        }
    }

    /// Short label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            WpError::Transport(_) => "transport",
            WpError::Status(_) => "status",
            WpError::Parse(_) => "parse",
            WpError::NotFound(_) => "not_found",
            WpError::Config(_) => "config",
        }
    }
}

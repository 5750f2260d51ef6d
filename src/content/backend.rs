//! Raw transport against the WordPress REST API.
//!
//! The trait is the seam between the caching client and the network, so
//! tests can swap in a scripted backend with a call counter.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::Config;
use crate::content::models::{Category, Media, Post};
use crate::error::WpError;

/// WordPress REST routes consumed by the engine
const CATEGORIES_ENDPOINT: &str = "wp/v2/categories";
const POSTS_ENDPOINT: &str = "wp/v2/posts";
const MEDIA_ENDPOINT: &str = "wp/v2/media";

const USER_AGENT: &str = "WpContentEngine/0.1";

/// Endpoint-level operations, one per consumed route.
///
/// Implementations report failures through the [`WpError`] taxonomy and
/// never degrade results themselves; the collapse-to-empty policy lives
/// one layer up in the client.
#[async_trait]
pub trait WordPressBackend: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, WpError>;
    async fn list_posts(&self) -> Result<Vec<Post>, WpError>;
    async fn list_posts_by_category(&self, category_id: u64) -> Result<Vec<Post>, WpError>;
    /// Slug filtering returns zero or one post; the raw list is passed
    /// through so the caller owns the absent-vs-found decision.
    async fn list_posts_by_slug(&self, slug: &str) -> Result<Vec<Post>, WpError>;
    async fn get_post(&self, post_id: u64) -> Result<Post, WpError>;
    async fn get_media(&self, media_id: u64) -> Result<Media, WpError>;
}

/// reqwest-backed transport against a fixed base URL.
pub struct HttpBackend {
    http: Client,
    base_url: String,
    per_page: u32,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, WpError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| WpError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            per_page: config.per_page,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, WpError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("🔍 GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| WpError::Transport(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WpError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WpError::Parse(format!("Unexpected body from {}: {}", url, e)))
    }
}

#[async_trait]
impl WordPressBackend for HttpBackend {
    async fn list_categories(&self) -> Result<Vec<Category>, WpError> {
        self.get_json(
            CATEGORIES_ENDPOINT,
            &[("per_page", self.per_page.to_string())],
        )
        .await
    }

    async fn list_posts(&self) -> Result<Vec<Post>, WpError> {
        self.get_json(
            POSTS_ENDPOINT,
            &[
                ("per_page", self.per_page.to_string()),
                ("_embed", "1".to_string()),
            ],
        )
        .await
    }

    async fn list_posts_by_category(&self, category_id: u64) -> Result<Vec<Post>, WpError> {
        self.get_json(
            POSTS_ENDPOINT,
            &[
                ("categories", category_id.to_string()),
                ("per_page", self.per_page.to_string()),
                ("_embed", "1".to_string()),
            ],
        )
        .await
    }

    async fn list_posts_by_slug(&self, slug: &str) -> Result<Vec<Post>, WpError> {
        self.get_json(
            POSTS_ENDPOINT,
            &[("slug", slug.to_string()), ("_embed", "1".to_string())],
        )
        .await
    }

    async fn get_post(&self, post_id: u64) -> Result<Post, WpError> {
        let endpoint = format!("{}/{}", POSTS_ENDPOINT, post_id);
        match self
            .get_json(&endpoint, &[("_embed", "1".to_string())])
            .await
        {
            Err(WpError::Status(404)) => Err(WpError::NotFound(format!("post {}", post_id))),
            other => other,
        }
    }

    async fn get_media(&self, media_id: u64) -> Result<Media, WpError> {
        let endpoint = format!("{}/{}", MEDIA_ENDPOINT, media_id);
        match self.get_json(&endpoint, &[]).await {
            Err(WpError::Status(404)) => Err(WpError::NotFound(format!("media {}", media_id))),
            other => other,
        }
    }
}

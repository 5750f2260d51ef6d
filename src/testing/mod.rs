//! Test support: a scripted WordPress backend and a manual clock.
//!
//! Compiled into the library so integration tests under `tests/` can
//! drive the content client without a network. The mock backend counts
//! calls per operation, which is how the cache-idempotence and
//! single-flight properties are asserted.

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::cache::Clock;
use crate::content::backend::WordPressBackend;
use crate::content::models::{Category, Media, Post, Rendered};
use crate::error::WpError;

/// Deterministic clock advanced by hand from tests.
pub struct ManualClock {
    base: Instant,
    offset_ms: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_ms: AtomicU64::new(0),
        }
    }

    pub fn advance(&self, duration: Duration) {
        self.offset_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + Duration::from_millis(self.offset_ms.load(Ordering::SeqCst))
    }
}

/// Scripted backend with per-operation call counters.
///
/// Responses are set up front; a configured failure applies to every
/// operation until cleared. An optional artificial latency lets tests
/// overlap two callers on the same key.
#[derive(Default)]
pub struct MockBackend {
    categories: Mutex<Vec<Category>>,
    posts: Mutex<Vec<Post>>,
    media: Mutex<Vec<Media>>,
    failure: Mutex<Option<WpError>>,
    response_delay: Mutex<Duration>,
    calls: DashMap<&'static str, u64>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        *self.categories.lock().expect("categories lock") = categories;
        self
    }

    pub fn with_posts(self, posts: Vec<Post>) -> Self {
        *self.posts.lock().expect("posts lock") = posts;
        self
    }

    pub fn with_media(self, media: Vec<Media>) -> Self {
        *self.media.lock().expect("media lock") = media;
        self
    }

    /// Makes every subsequent operation fail with `error`; pass `None`
    /// to restore normal responses.
    pub fn set_failure(&self, error: Option<WpError>) {
        *self.failure.lock().expect("failure lock") = error;
    }

    /// Replaces the scripted post set mid-test.
    pub fn set_posts(&self, posts: Vec<Post>) {
        *self.posts.lock().expect("posts lock") = posts;
    }

    pub fn set_response_delay(&self, delay: Duration) {
        *self.response_delay.lock().expect("delay lock") = delay;
    }

    /// Number of backend calls recorded for `operation`.
    pub fn calls(&self, operation: &str) -> u64 {
        self.calls.get(operation).map(|c| *c).unwrap_or(0)
    }

    fn record(&self, operation: &'static str) {
        *self.calls.entry(operation).or_insert(0) += 1;
    }

    async fn simulate_latency(&self) {
        let delay = *self.response_delay.lock().expect("delay lock");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn configured_failure(&self) -> Option<WpError> {
        self.failure.lock().expect("failure lock").clone()
    }
}

#[async_trait]
impl WordPressBackend for MockBackend {
    async fn list_categories(&self) -> Result<Vec<Category>, WpError> {
        self.record("categories");
        self.simulate_latency().await;
        if let Some(err) = self.configured_failure() {
            return Err(err);
        }
        Ok(self.categories.lock().expect("categories lock").clone())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, WpError> {
        self.record("posts");
        self.simulate_latency().await;
        if let Some(err) = self.configured_failure() {
            return Err(err);
        }
        Ok(self.posts.lock().expect("posts lock").clone())
    }

    async fn list_posts_by_category(&self, category_id: u64) -> Result<Vec<Post>, WpError> {
        self.record("posts_by_category");
        self.simulate_latency().await;
        if let Some(err) = self.configured_failure() {
            return Err(err);
        }
        Ok(self
            .posts
            .lock()
            .expect("posts lock")
            .iter()
            .filter(|p| p.categories.contains(&category_id))
            .cloned()
            .collect())
    }

    async fn list_posts_by_slug(&self, slug: &str) -> Result<Vec<Post>, WpError> {
        self.record("posts_by_slug");
        self.simulate_latency().await;
        if let Some(err) = self.configured_failure() {
            return Err(err);
        }
        Ok(self
            .posts
            .lock()
            .expect("posts lock")
            .iter()
            .filter(|p| p.slug == slug)
            .cloned()
            .collect())
    }

    async fn get_post(&self, post_id: u64) -> Result<Post, WpError> {
        self.record("post");
        self.simulate_latency().await;
        if let Some(err) = self.configured_failure() {
            return Err(err);
        }
        self.posts
            .lock()
            .expect("posts lock")
            .iter()
            .find(|p| p.id == post_id)
            .cloned()
            .ok_or_else(|| WpError::NotFound(format!("post {}", post_id)))
    }

    async fn get_media(&self, media_id: u64) -> Result<Media, WpError> {
        self.record("media");
        self.simulate_latency().await;
        if let Some(err) = self.configured_failure() {
            return Err(err);
        }
        self.media
            .lock()
            .expect("media lock")
            .iter()
            .find(|m| m.id == media_id)
            .cloned()
            .ok_or_else(|| WpError::NotFound(format!("media {}", media_id)))
    }
}

/// Category fixture with the fields the engine actually reads.
pub fn sample_category(id: u64, count: u64, name: &str) -> Category {
    let slug = name.to_lowercase().replace(' ', "-");
    Category {
        id,
        count,
        description: String::new(),
        link: format!("https://example.com/category/{}/", slug),
        name: name.to_string(),
        slug,
        taxonomy: "category".to_string(),
        parent: 0,
    }
}

/// Post fixture with rendered HTML fragments.
pub fn sample_post(id: u64, slug: &str, categories: Vec<u64>) -> Post {
    let date = NaiveDate::from_ymd_opt(2024, 5, 2)
        .expect("valid date")
        .and_hms_opt(9, 30, 0)
        .expect("valid time");
    Post {
        id,
        date,
        slug: slug.to_string(),
        link: format!("https://example.com/{}/", slug),
        title: Rendered {
            rendered: format!("Title of {}", slug),
        },
        excerpt: Rendered {
            rendered: format!("<p>Excerpt of {}</p>", slug),
        },
        content: Rendered {
            rendered: format!("<p>Content of {}</p>", slug),
        },
        categories,
        featured_media: 0,
    }
}

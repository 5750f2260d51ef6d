//! Cache-through content client.
//!
//! Every operation consults the response cache under its key's flight
//! lock, hits the backend only on a miss, and writes back nothing but
//! successful results. Failures degrade to an empty sequence or an
//! absent value after a log line naming the failure kind; callers render
//! an empty or not-found state and never see an error.

use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{Clock, FlightTable, ResponseCache};
use crate::content::backend::WordPressBackend;
use crate::content::models::{Category, Media, Post};

const CATEGORIES_KEY: &str = "categories";
const ALL_POSTS_KEY: &str = "all_posts";

fn posts_category_key(category_id: u64) -> String {
    format!("posts_category_{}", category_id)
}

fn post_slug_key(slug: &str) -> String {
    format!("post_slug_{}", slug)
}

pub struct ContentClient {
    backend: Arc<dyn WordPressBackend>,
    categories: ResponseCache<Vec<Category>>,
    posts: ResponseCache<Vec<Post>>,
    single_posts: ResponseCache<Post>,
    flights: FlightTable,
}

impl ContentClient {
    pub fn new(backend: Arc<dyn WordPressBackend>, ttl: Duration) -> Self {
        Self {
            backend,
            categories: ResponseCache::new(ttl),
            posts: ResponseCache::new(ttl),
            single_posts: ResponseCache::new(ttl),
            flights: FlightTable::new(),
        }
    }

    /// Same as [`ContentClient::new`] with an injected time source, so
    /// tests can expire entries without waiting out the TTL.
    pub fn with_clock(backend: Arc<dyn WordPressBackend>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            backend,
            categories: ResponseCache::with_clock(ttl, clock.clone()),
            posts: ResponseCache::with_clock(ttl, clock.clone()),
            single_posts: ResponseCache::with_clock(ttl, clock),
            flights: FlightTable::new(),
        }
    }

    /// Categories with at least one post, in backend order.
    pub async fn categories(&self) -> Vec<Category> {
        if let Some(hit) = self.categories.get(CATEGORIES_KEY) {
            debug!("Cache hit for {}", CATEGORIES_KEY);
            return hit;
        }

        let _flight = self.flights.acquire(CATEGORIES_KEY).await;
        if let Some(hit) = self.categories.get(CATEGORIES_KEY) {
            return hit;
        }

        match self.backend.list_categories().await {
            Ok(all) => {
                // Empty categories are never surfaced to the UI layer.
                let visible: Vec<Category> = all.into_iter().filter(|c| c.count > 0).collect();
                self.categories.put(CATEGORIES_KEY, visible.clone());
                debug!("Fetched {} non-empty categories", visible.len());
                visible
            }
            Err(e) => {
                warn!("Category fetch failed ({}), serving empty list: {}", e.kind(), e);
                Vec::new()
            }
        }
    }

    /// All posts, newest first as the backend orders them.
    pub async fn posts(&self) -> Vec<Post> {
        if let Some(hit) = self.posts.get(ALL_POSTS_KEY) {
            debug!("Cache hit for {}", ALL_POSTS_KEY);
            return hit;
        }

        let _flight = self.flights.acquire(ALL_POSTS_KEY).await;
        if let Some(hit) = self.posts.get(ALL_POSTS_KEY) {
            return hit;
        }

        match self.backend.list_posts().await {
            Ok(posts) => {
                self.posts.put(ALL_POSTS_KEY, posts.clone());
                posts
            }
            Err(e) => {
                warn!("Post fetch failed ({}), serving empty list: {}", e.kind(), e);
                Vec::new()
            }
        }
    }

    /// Posts belonging to one category.
    pub async fn posts_by_category(&self, category_id: u64) -> Vec<Post> {
        let key = posts_category_key(category_id);
        if let Some(hit) = self.posts.get(&key) {
            debug!("Cache hit for {}", key);
            return hit;
        }

        let _flight = self.flights.acquire(&key).await;
        if let Some(hit) = self.posts.get(&key) {
            return hit;
        }

        match self.backend.list_posts_by_category(category_id).await {
            Ok(posts) => {
                self.posts.put(&key, posts.clone());
                posts
            }
            Err(e) => {
                warn!(
                    "Post fetch for category {} failed ({}), serving empty list: {}",
                    category_id,
                    e.kind(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// The post published under `slug`, if any.
    ///
    /// "Not found" and "fetch failed" both come back as `None`; only a
    /// found post is written to the cache, so absent or failed lookups
    /// retry on the next call instead of pinning a negative result for a
    /// whole TTL window.
    pub async fn post_by_slug(&self, slug: &str) -> Option<Post> {
        let key = post_slug_key(slug);
        if let Some(hit) = self.single_posts.get(&key) {
            debug!("Cache hit for {}", key);
            return Some(hit);
        }

        let _flight = self.flights.acquire(&key).await;
        if let Some(hit) = self.single_posts.get(&key) {
            return Some(hit);
        }

        match self.backend.list_posts_by_slug(slug).await {
            Ok(posts) => match posts.into_iter().next() {
                Some(post) => {
                    self.single_posts.put(&key, post.clone());
                    Some(post)
                }
                None => {
                    debug!("No post published under slug '{}'", slug);
                    None
                }
            },
            Err(e) => {
                warn!("Post lookup for slug '{}' failed ({}): {}", slug, e.kind(), e);
                None
            }
        }
    }

    /// Direct id lookup. Not cached; the UI reaches posts through slugs
    /// and categories, this path only serves ad-hoc lookups.
    pub async fn post_by_id(&self, post_id: u64) -> Option<Post> {
        match self.backend.get_post(post_id).await {
            Ok(post) => Some(post),
            Err(e) => {
                warn!("Post lookup for id {} failed ({}): {}", post_id, e.kind(), e);
                None
            }
        }
    }

    /// Featured-image lookup. Not cached.
    pub async fn media_by_id(&self, media_id: u64) -> Option<Media> {
        match self.backend.get_media(media_id).await {
            Ok(media) => Some(media),
            Err(e) => {
                warn!("Media lookup for id {} failed ({}): {}", media_id, e.kind(), e);
                None
            }
        }
    }

    /// Background cache warm-up for one category's posts, delayed so it
    /// yields to whatever the caller is rendering first. The dropdown's
    /// mount-time prefetch runs through here.
    pub fn warm_category(
        self: Arc<Self>,
        category_id: u64,
        delay: Duration,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let posts = self.posts_by_category(category_id).await;
            debug!(
                "Warmed cache with {} posts for category {}",
                posts.len(),
                category_id
            );
        })
    }

    /// Sequential low-priority warm-up of every category, with a gap
    /// between requests so the backend is not hammered on page load.
    pub fn warm_all(
        self: Arc<Self>,
        category_ids: Vec<u64>,
        initial_delay: Duration,
        gap: Duration,
    ) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            tokio::time::sleep(initial_delay).await;
            for category_id in category_ids {
                self.posts_by_category(category_id).await;
                tokio::time::sleep(gap).await;
            }
            debug!("Cache warm-up pass complete");
        })
    }
}

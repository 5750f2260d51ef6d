// src/content/mod.rs

pub mod backend;
pub mod client;
pub mod models;
pub mod sanitize;

pub use backend::{HttpBackend, WordPressBackend};
pub use client::ContentClient;
pub use models::{Category, Media, Post, Rendered};

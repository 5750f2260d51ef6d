//! Content engine for a WordPress-backed personal marketing site:
//! a cached REST client, an in-flight request registry, a minimal HTML
//! denylist, and the headless dropdown interaction state machine.

pub mod cache;
pub mod config;
pub mod content;
pub mod dropdown;
pub mod error;
pub mod testing; // Mock backend and manual clock, shared with tests/

// Re-export the types most callers need
pub use cache::{Clock, FlightTable, ResponseCache, SystemClock};
pub use config::{load_config, Config};
pub use content::{Category, ContentClient, HttpBackend, Media, Post, Rendered, WordPressBackend};
pub use dropdown::{Action, DropdownEvent, DropdownState, FetchPhase};
pub use error::WpError;

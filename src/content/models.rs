//! Wire types for the consumed WordPress REST endpoints.
//!
//! Field names mirror the JSON the `/wp/v2/` routes emit, so the derive
//! impls need no renames. Title, excerpt and content arrive pre-rendered
//! as HTML fragments wrapped in a `{"rendered": ...}` object.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A taxonomy term grouping posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub count: u64,
    pub description: String,
    pub link: String,
    pub name: String,
    pub slug: String,
    pub taxonomy: String,
    pub parent: u64,
}

/// Pre-rendered HTML fragment as WordPress delivers it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rendered {
    pub rendered: String,
}

/// A content item. The slug doubles as the routing segment (`/{slug}/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub date: NaiveDateTime,
    pub slug: String,
    pub link: String,
    pub title: Rendered,
    pub excerpt: Rendered,
    pub content: Rendered,
    pub categories: Vec<u64>,
    pub featured_media: u64,
}

/// A media attachment, looked up for featured images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub id: u64,
    pub source_url: String,
    pub alt_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn category_deserializes_from_wire_json() {
        let json = r#"{
            "id": 4,
            "count": 12,
            "description": "Campaign write-ups",
            "link": "https://example.com/category/campagnes/",
            "name": "Campagnes",
            "slug": "campagnes",
            "taxonomy": "category",
            "parent": 0
        }"#;

        let category: Category = serde_json::from_str(json).expect("valid category JSON");
        assert_eq!(category.id, 4);
        assert_eq!(category.count, 12);
        assert_eq!(category.slug, "campagnes");
        assert_eq!(category.parent, 0);
    }

    #[test]
    fn post_deserializes_rendered_fields_and_date() {
        let json = r#"{
            "id": 101,
            "date": "2024-05-02T09:30:00",
            "slug": "merkpositionering-in-2024",
            "link": "https://example.com/merkpositionering-in-2024/",
            "title": {"rendered": "Merkpositionering in 2024"},
            "excerpt": {"rendered": "<p>Een korte inleiding.</p>"},
            "content": {"rendered": "<p>De volledige tekst.</p>"},
            "categories": [4, 7],
            "featured_media": 55
        }"#;

        let post: Post = serde_json::from_str(json).expect("valid post JSON");
        assert_eq!(post.slug, "merkpositionering-in-2024");
        assert_eq!(post.title.rendered, "Merkpositionering in 2024");
        assert_eq!(post.categories, vec![4, 7]);
        assert_eq!(post.date.format("%Y-%m-%d").to_string(), "2024-05-02");
    }

    #[test]
    fn unknown_wire_fields_are_ignored() {
        // The live API sends far more fields than the engine consumes.
        let json = r#"{
            "id": 9,
            "count": 3,
            "description": "",
            "link": "https://example.com/category/nieuws/",
            "name": "Nieuws",
            "slug": "nieuws",
            "taxonomy": "category",
            "parent": 0,
            "meta": [],
            "_links": {"self": []}
        }"#;

        let category: Category = serde_json::from_str(json).expect("extra fields tolerated");
        assert_eq!(category.name, "Nieuws");
    }
}

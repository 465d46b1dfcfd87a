//! The post entity and its presentation-neutral derivations.
//!
//! Posts are owned by the remote Post Store; the engine only ever reads a
//! snapshot of them. Everything here is either the entity itself or a pure
//! derivation of a single post (excerpt fallback, truncated titles).

use serde::Serialize;
use time::OffsetDateTime;

/// Illustration used when a post carries no image of its own.
pub const FALLBACK_IMAGE: &str = "src/IMG_2581.png";

/// Prefix length used when deriving an excerpt from the full content.
pub const EXCERPT_PREFIX_CHARS: usize = 150;

/// Width ceiling for the banner "latest article" shortcut.
pub const BANNER_TITLE_CHARS: usize = 30;

/// Width ceiling for related-post teaser text.
pub const TEASER_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub popular: bool,
    pub views: u64,
}

impl Post {
    /// Excerpt shown on listing cards: the stored excerpt when present,
    /// otherwise a fixed-length content prefix with a truncation marker.
    pub fn excerpt_text(&self) -> String {
        match &self.excerpt {
            Some(excerpt) => excerpt.clone(),
            None => {
                let prefix: String = self.content.chars().take(EXCERPT_PREFIX_CHARS).collect();
                format!("{prefix}...")
            }
        }
    }

    pub fn image_or_fallback(&self) -> &str {
        self.image_url.as_deref().unwrap_or(FALLBACK_IMAGE)
    }

    /// Title for the banner shortcut, truncated to the banner width.
    pub fn banner_title(&self) -> String {
        truncate_with_marker(&self.title, BANNER_TITLE_CHARS)
    }

    /// Short teaser used by related-post widgets; prefers the stored excerpt.
    pub fn teaser(&self) -> String {
        let source = self.excerpt.as_deref().unwrap_or(&self.content);
        truncate_with_marker(source, TEASER_CHARS)
    }
}

fn truncate_with_marker(text: &str, limit: usize) -> String {
    if text.chars().count() > limit {
        let prefix: String = text.chars().take(limit).collect();
        format!("{prefix}...")
    } else {
        text.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn post(content: &str, excerpt: Option<&str>) -> Post {
        Post {
            id: 1,
            title: "A fairly long headline about nothing in particular".into(),
            category: "News".into(),
            content: content.into(),
            excerpt: excerpt.map(str::to_owned),
            image_url: None,
            date: datetime!(2024-01-15 09:30 UTC),
            popular: false,
            views: 0,
        }
    }

    #[test]
    fn stored_excerpt_wins_over_derived_prefix() {
        let post = post("long content ".repeat(30).as_str(), Some("short"));
        assert_eq!(post.excerpt_text(), "short");
    }

    #[test]
    fn derived_excerpt_truncates_content_with_marker() {
        let content = "x".repeat(400);
        let post = post(&content, None);
        let excerpt = post.excerpt_text();
        assert_eq!(excerpt.chars().count(), EXCERPT_PREFIX_CHARS + 3);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn short_content_keeps_trailing_marker_only_on_derived_excerpt() {
        let post = post("tiny", None);
        assert_eq!(post.excerpt_text(), "tiny...");
    }

    #[test]
    fn missing_image_falls_back_to_default_asset() {
        let post = post("body", None);
        assert_eq!(post.image_or_fallback(), FALLBACK_IMAGE);
    }

    #[test]
    fn banner_title_is_truncated_to_thirty_chars() {
        let post = post("body", None);
        let banner = post.banner_title();
        assert_eq!(banner.chars().count(), BANNER_TITLE_CHARS + 3);
        assert!(banner.ends_with("..."));
    }

    #[test]
    fn short_banner_title_is_untouched() {
        let mut post = post("body", None);
        post.title = "Brief".into();
        assert_eq!(post.banner_title(), "Brief");
    }

    #[test]
    fn teaser_prefers_excerpt_over_content() {
        let post = post("content body", Some("excerpt body"));
        assert_eq!(post.teaser(), "excerpt body");
    }
}

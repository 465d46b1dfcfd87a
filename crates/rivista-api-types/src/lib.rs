//! Shared request and response types for the Rivista post API.
//!
//! The Post Store speaks camelCase JSON; every payload that crosses the wire
//! is defined here so the client and any other consumer agree on one shape.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A single post as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: u64,
    pub title: String,
    pub category: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub views: u64,
}

/// Full snapshot returned by `GET /api/posts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostsResponse {
    #[serde(default)]
    pub posts: Vec<PostDto>,
}

/// Response of `PUT /api/posts/{id}/views`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewsResponse {
    pub views: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Aggregate counters from `GET /api/posts/stats`.
///
/// `total_views` is null on an empty table (SQL `SUM`), so every field
/// defaults rather than failing the decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    #[serde(default)]
    pub total_posts: u64,
    #[serde(default)]
    pub popular_posts: u64,
    #[serde(default)]
    pub total_views: Option<u64>,
    #[serde(default)]
    pub avg_views: Option<f64>,
}

/// Body of `POST /api/posts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub category: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub popular: bool,
}

/// Body of `PUT /api/posts/{id}`; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,
}

/// Confirmation envelope returned by create, update and delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSavedResponse {
    #[serde(default)]
    pub message: String,
    pub post: PostDto,
}

/// Error envelope carried by every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn post_decodes_camel_case_with_optional_fields_absent() {
        let post: PostDto = serde_json::from_str(
            r#"{
                "id": 7,
                "title": "Hello",
                "category": "News",
                "content": "Body text",
                "date": "2024-01-15T09:30:00Z"
            }"#,
        )
        .expect("decoded post");

        assert_eq!(post.id, 7);
        assert_eq!(post.excerpt, None);
        assert_eq!(post.image_url, None);
        assert!(!post.popular);
        assert_eq!(post.views, 0);
        assert_eq!(post.date, datetime!(2024-01-15 09:30 UTC));
    }

    #[test]
    fn image_url_round_trips_as_camel_case() {
        let post = PostDto {
            id: 1,
            title: "t".into(),
            category: "c".into(),
            content: "b".into(),
            excerpt: None,
            image_url: Some("src/cover.png".into()),
            date: datetime!(2023-12-01 00:00 UTC),
            popular: true,
            views: 3,
        };

        let json = serde_json::to_value(&post).expect("encoded post");
        assert_eq!(json["imageUrl"], "src/cover.png");
        assert!(json.get("excerpt").is_none());

        let decoded: PostDto = serde_json::from_value(json).expect("decoded post");
        assert_eq!(decoded, post);
    }

    #[test]
    fn posts_response_defaults_to_empty_list() {
        let snapshot: PostsResponse = serde_json::from_str("{}").expect("decoded snapshot");
        assert!(snapshot.posts.is_empty());
    }

    #[test]
    fn stats_tolerate_missing_and_null_aggregates() {
        let stats: StatsResponse =
            serde_json::from_str(r#"{"total_posts": 0, "total_views": null}"#)
                .expect("decoded stats");
        assert_eq!(stats.total_posts, 0);
        assert_eq!(stats.total_views, None);
        assert_eq!(stats.avg_views, None);
    }

    #[test]
    fn update_request_skips_unset_fields() {
        let patch = UpdatePostRequest {
            popular: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).expect("encoded patch");
        assert_eq!(json, serde_json::json!({ "popular": true }));
    }
}

//! Port describing the remote post store.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::posts::Post;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("store responded with status {status}: {message}")]
    Server { status: u16, message: String },
    #[error("invalid store payload: {0}")]
    Decode(String),
    #[error("invalid store url: {0}")]
    Url(String),
}

impl StoreError {
    pub fn from_transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn from_decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Fields required to publish a new post. The store stamps the date.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub category: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub image_url: Option<String>,
    pub popular: bool,
}

/// Partial update; unset fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub image_url: Option<String>,
    pub popular: Option<bool>,
}

/// Corpus-wide counters reported by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PostStats {
    pub total_posts: u64,
    pub popular_posts: u64,
    pub total_views: u64,
    pub avg_views: f64,
}

/// Remote collection of posts and its mutation surface.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Full collection, in store order.
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError>;

    /// Bumps the view counter and returns the new total.
    async fn increment_views(&self, id: u64) -> Result<u64, StoreError>;

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError>;

    async fn update_post(&self, id: u64, patch: PostPatch) -> Result<Post, StoreError>;

    async fn delete_post(&self, id: u64) -> Result<Post, StoreError>;

    async fn stats(&self) -> Result<PostStats, StoreError>;
}

//! Editorial surface over the post store.

use std::sync::Arc;

use thiserror::Error;

use crate::application::feed::{Feed, FeedSettings};
use crate::application::store::{NewPost, PostPatch, PostStats, PostStore, StoreError};
use crate::domain::error::DomainError;
use crate::domain::posts::Post;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Create/update/delete operations plus the editor's own listing.
///
/// The service keeps its own `Feed` so the editor sees a listing consistent
/// with the collection it just mutated.
pub struct AdminService {
    store: Arc<dyn PostStore>,
    feed: Feed,
}

impl AdminService {
    pub fn new(store: Arc<dyn PostStore>, settings: FeedSettings) -> Self {
        let feed = Feed::new(Arc::clone(&store), settings);
        Self { store, feed }
    }

    pub async fn load(&mut self) {
        self.feed.load().await;
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut Feed {
        &mut self.feed
    }

    pub async fn create_post(&mut self, post: NewPost) -> Result<Post, AdminError> {
        validate_required("title", &post.title)?;
        validate_required("category", &post.category)?;
        validate_required("content", &post.content)?;

        let created = self.store.create_post(post).await?;
        self.feed.load().await;
        Ok(created)
    }

    pub async fn update_post(&mut self, id: u64, patch: PostPatch) -> Result<Post, AdminError> {
        if let Some(title) = &patch.title {
            validate_required("title", title)?;
        }
        if let Some(category) = &patch.category {
            validate_required("category", category)?;
        }
        if let Some(content) = &patch.content {
            validate_required("content", content)?;
        }

        let updated = self.store.update_post(id, patch).await?;
        self.feed.load().await;
        Ok(updated)
    }

    pub async fn delete_post(&mut self, id: u64) -> Result<Post, AdminError> {
        let deleted = self.store.delete_post(id).await?;
        self.feed.load().await;
        Ok(deleted)
    }

    pub async fn stats(&self) -> Result<PostStats, AdminError> {
        Ok(self.store.stats().await?)
    }
}

fn validate_required(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::missing_field(field));
    }
    Ok(())
}

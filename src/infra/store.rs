//! HTTP adapter for the remote post store.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use rivista_api_types::{
    CreatePostRequest, ErrorResponse, PostDto, PostSavedResponse, PostsResponse, StatsResponse,
    UpdatePostRequest, ViewsResponse,
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::store::{NewPost, PostPatch, PostStats, PostStore, StoreError};
use crate::domain::posts::Post;

/// `PostStore` backed by the store's JSON API.
#[derive(Clone, Debug)]
pub struct HttpPostStore {
    client: Client,
    base: Url,
}

impl HttpPostStore {
    pub fn new(base: &Url) -> Result<Self, StoreError> {
        let base = base
            .join("/")
            .map_err(|err| StoreError::Url(err.to_string()))?;
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(StoreError::from_transport)?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("rivista/", env!("CARGO_PKG_VERSION"))
    }

    fn url(&self, path: &str) -> Result<Url, StoreError> {
        self.base
            .join(path)
            .map_err(|err| StoreError::Url(err.to_string()))
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, StoreError> {
        let url = self.url(path)?;
        debug!(%method, %url, "store request");

        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req.send().await.map_err(StoreError::from_transport)?;
        Self::handle(resp).await
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, StoreError> {
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(StoreError::from_transport)?;

        if !status.is_success() {
            let message = match serde_json::from_slice::<ErrorResponse>(&bytes) {
                Ok(envelope) => envelope.error,
                Err(_) => String::from_utf8_lossy(&bytes).into_owned(),
            };
            return Err(StoreError::Server {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(StoreError::from_decode)
    }
}

#[async_trait]
impl PostStore for HttpPostStore {
    async fn list_posts(&self) -> Result<Vec<Post>, StoreError> {
        let snapshot: PostsResponse = self.request(Method::GET, "api/posts", None).await?;
        Ok(snapshot.posts.into_iter().map(post_from_dto).collect())
    }

    async fn increment_views(&self, id: u64) -> Result<u64, StoreError> {
        let counted: ViewsResponse = self
            .request(Method::PUT, &format!("api/posts/{id}/views"), None)
            .await?;
        Ok(counted.views)
    }

    async fn create_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let body = serde_json::to_value(create_request(post))
            .map_err(StoreError::from_decode)?;
        let saved: PostSavedResponse = self
            .request(Method::POST, "api/posts", Some(body))
            .await?;
        Ok(post_from_dto(saved.post))
    }

    async fn update_post(&self, id: u64, patch: PostPatch) -> Result<Post, StoreError> {
        let body = serde_json::to_value(update_request(patch))
            .map_err(StoreError::from_decode)?;
        let saved: PostSavedResponse = self
            .request(Method::PUT, &format!("api/posts/{id}"), Some(body))
            .await?;
        Ok(post_from_dto(saved.post))
    }

    async fn delete_post(&self, id: u64) -> Result<Post, StoreError> {
        let saved: PostSavedResponse = self
            .request(Method::DELETE, &format!("api/posts/{id}"), None)
            .await?;
        Ok(post_from_dto(saved.post))
    }

    async fn stats(&self) -> Result<PostStats, StoreError> {
        let stats: StatsResponse = self.request(Method::GET, "api/posts/stats", None).await?;
        Ok(PostStats {
            total_posts: stats.total_posts,
            popular_posts: stats.popular_posts,
            total_views: stats.total_views.unwrap_or(0),
            avg_views: stats.avg_views.unwrap_or(0.0),
        })
    }
}

fn post_from_dto(dto: PostDto) -> Post {
    Post {
        id: dto.id,
        title: dto.title,
        category: dto.category,
        content: dto.content,
        excerpt: dto.excerpt,
        image_url: dto.image_url,
        date: dto.date,
        popular: dto.popular,
        views: dto.views,
    }
}

fn create_request(post: NewPost) -> CreatePostRequest {
    CreatePostRequest {
        title: post.title,
        category: post.category,
        content: post.content,
        excerpt: post.excerpt,
        image_url: post.image_url,
        popular: post.popular,
    }
}

fn update_request(patch: PostPatch) -> UpdatePostRequest {
    UpdatePostRequest {
        title: patch.title,
        category: patch.category,
        content: patch.content,
        excerpt: patch.excerpt,
        image_url: patch.image_url,
        popular: patch.popular,
    }
}

//! Snapshot-backed feed engine.
//!
//! `Feed` loads the whole post collection once and answers every listing,
//! homepage and article question from that in-memory snapshot. Derivations
//! run on each call; only `load` talks to the store.

use std::sync::Arc;

use tracing::warn;

use crate::application::aggregates::{
    self, ArchiveBucket, CategoryCount, most_recent, popular_posts, recent_posts, related_posts,
};
use crate::application::filter::FilterState;
use crate::application::pagination::{self, DEFAULT_PAGE_SIZE, PageControl};
use crate::application::store::PostStore;
use crate::domain::error::DomainError;
use crate::domain::posts::Post;

/// Derivation limits, one knob per surface.
#[derive(Debug, Clone, Copy)]
pub struct FeedSettings {
    pub page_size: usize,
    pub popular_limit: usize,
    pub archive_limit: usize,
    pub recent_limit: usize,
    pub related_limit: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            popular_limit: 5,
            archive_limit: 10,
            recent_limit: 5,
            related_limit: 3,
        }
    }
}

impl From<&crate::config::FeedLimits> for FeedSettings {
    fn from(limits: &crate::config::FeedLimits) -> Self {
        Self {
            page_size: limits.page_size,
            popular_limit: limits.popular_limit,
            archive_limit: limits.archive_limit,
            recent_limit: limits.recent_limit,
            related_limit: limits.related_limit,
        }
    }
}

/// Everything a listing page needs, borrowed from the snapshot.
pub struct Listing<'a> {
    pub posts: Vec<&'a Post>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub controls: Vec<PageControl>,
    pub categories: Vec<CategoryCount>,
    pub archives: Vec<ArchiveBucket>,
    pub popular: Vec<&'a Post>,
}

/// A popular entry rendered as a banner link.
pub struct BannerLink<'a> {
    pub post_id: u64,
    pub title: String,
    pub post: &'a Post,
}

/// Homepage surfaces derived from the unfiltered snapshot.
pub struct HomeView<'a> {
    pub lead: Option<&'a Post>,
    pub rail: Vec<&'a Post>,
    pub banners: Vec<BannerLink<'a>>,
}

/// One article plus its sidebar companions.
#[derive(Debug)]
pub struct ArticleView<'a> {
    pub post: &'a Post,
    /// View total after the read was counted. Falls back to the snapshot
    /// value when the store cannot record the read.
    pub views: u64,
    pub related: Vec<&'a Post>,
}

pub struct Feed {
    store: Arc<dyn PostStore>,
    settings: FeedSettings,
    snapshot: Vec<Post>,
    state: FilterState,
}

impl Feed {
    pub fn new(store: Arc<dyn PostStore>, settings: FeedSettings) -> Self {
        Self {
            store,
            settings,
            snapshot: Vec::new(),
            state: FilterState::default(),
        }
    }

    /// Refreshes the snapshot from the store. A failed fetch degrades to an
    /// empty snapshot rather than an error so every surface stays renderable.
    pub async fn load(&mut self) {
        match self.store.list_posts().await {
            Ok(posts) => self.snapshot = posts,
            Err(err) => {
                warn!(error = %err, "failed to load posts, serving an empty snapshot");
                self.snapshot = Vec::new();
            }
        }
    }

    pub fn snapshot(&self) -> &[Post] {
        &self.snapshot
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn set_search(&mut self, query: &str) {
        self.state.set_search(query);
    }

    pub fn toggle_category(&mut self, category: &str) {
        self.state.toggle_category(category);
    }

    pub fn select_archive(&mut self, key: &str) {
        self.state.select_archive(key);
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.set_page(page);
    }

    /// The listing page for the current filter state.
    pub fn listing(&self) -> Listing<'_> {
        let matches = self.state.apply(&self.snapshot);
        let total_matches = matches.len();
        let page = pagination::paginate(&matches, self.state.page(), self.settings.page_size);
        let controls = pagination::page_controls(page.number, page.total_pages);

        Listing {
            posts: page.items.to_vec(),
            page: page.number,
            total_pages: page.total_pages,
            total_matches,
            controls,
            categories: aggregates::category_counts(&self.snapshot, self.state.category()),
            archives: aggregates::archive_buckets(&self.snapshot, self.settings.archive_limit),
            popular: popular_posts(&self.snapshot, Some(self.settings.popular_limit)),
        }
    }

    /// Homepage: lead story, recency rail and popular banners. The banner
    /// strip shows the whole ranking; only sidebar widgets cap it.
    pub fn home(&self) -> HomeView<'_> {
        let banners = popular_posts(&self.snapshot, None)
            .into_iter()
            .map(|post| BannerLink {
                post_id: post.id,
                title: post.banner_title(),
                post,
            })
            .collect();

        HomeView {
            lead: most_recent(&self.snapshot),
            rail: recent_posts(&self.snapshot, self.settings.recent_limit),
            banners,
        }
    }

    /// One article by id, counting the read against the store.
    pub async fn article(&self, id: u64) -> Result<ArticleView<'_>, DomainError> {
        let post = self
            .snapshot
            .iter()
            .find(|post| post.id == id)
            .ok_or_else(|| DomainError::not_found("post", id))?;

        let views = match self.store.increment_views(id).await {
            Ok(views) => views,
            Err(err) => {
                warn!(post_id = id, error = %err, "failed to record the read");
                post.views
            }
        };

        Ok(ArticleView {
            post,
            views,
            related: related_posts(&self.snapshot, id, self.settings.related_limit),
        })
    }
}

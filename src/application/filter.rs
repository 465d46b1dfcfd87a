//! Listing filter state and its application to a snapshot.
//!
//! One `FilterState` replaces the per-page copies of search/category/page
//! bookkeeping: every consumer mutates the same state object and re-derives
//! its views from the unchanged snapshot.

use crate::domain::posts::Post;
use crate::util::dates;

/// Current listing filters. Search/category and the archive period are
/// mutually exclusive paths; whichever was set last wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    search: String,
    category: Option<String>,
    archive: Option<String>,
    page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            archive: None,
            page: 1,
        }
    }
}

impl FilterState {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Active archive period key (`YYYY-MM`), if any.
    pub fn archive(&self) -> Option<&str> {
        self.archive.as_deref()
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Replace the search text. Leaves the archive path and returns to page 1.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.archive = None;
        self.page = 1;
    }

    /// Select a category, or deselect it when it is already active.
    pub fn toggle_category(&mut self, category: &str) {
        self.category = if self.category.as_deref() == Some(category) {
            None
        } else {
            Some(category.to_owned())
        };
        self.archive = None;
        self.page = 1;
    }

    /// Switch to the archive path, dropping any search or category filter.
    pub fn select_archive(&mut self, period: impl Into<String>) {
        self.archive = Some(period.into());
        self.search.clear();
        self.category = None;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Subsequence of `snapshot`, in snapshot order, matching the active
    /// filters. Never mutates the snapshot.
    pub fn apply<'a>(&self, snapshot: &'a [Post]) -> Vec<&'a Post> {
        if let Some(period) = self.archive.as_deref() {
            return snapshot
                .iter()
                .filter(|post| dates::month_key(post.date) == period)
                .collect();
        }

        let needle = self.search.to_lowercase();
        snapshot
            .iter()
            .filter(|post| {
                let matches_search = needle.is_empty()
                    || post.title.to_lowercase().contains(&needle)
                    || post.content.to_lowercase().contains(&needle)
                    || post.category.to_lowercase().contains(&needle);
                let matches_category = self
                    .category
                    .as_deref()
                    .is_none_or(|category| post.category == category);
                matches_search && matches_category
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn post(id: u64, title: &str, category: &str, content: &str) -> Post {
        Post {
            id,
            title: title.into(),
            category: category.into(),
            content: content.into(),
            excerpt: None,
            image_url: None,
            date: datetime!(2024-03-10 08:00 UTC),
            popular: false,
            views: 0,
        }
    }

    fn snapshot() -> Vec<Post> {
        vec![
            post(1, "Rust ownership", "Tech", "borrow checker"),
            post(2, "Weekend recipes", "Food", "slow-cooked stew"),
            post(3, "Async Rust", "Tech", "executors and wakers"),
        ]
    }

    #[test]
    fn empty_state_is_identity_in_snapshot_order() {
        let posts = snapshot();
        let state = FilterState::default();
        let filtered = state.apply(&posts);
        let ids: Vec<u64> = filtered.iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_content_and_category() {
        let posts = snapshot();
        let mut state = FilterState::default();

        state.set_search("RUST");
        let ids: Vec<u64> = state.apply(&posts).iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![1, 3]);

        state.set_search("stew");
        let ids: Vec<u64> = state.apply(&posts).iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![2]);

        state.set_search("food");
        let ids: Vec<u64> = state.apply(&posts).iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn category_must_match_exactly() {
        let posts = snapshot();
        let mut state = FilterState::default();
        state.toggle_category("Tech");
        let ids: Vec<u64> = state.apply(&posts).iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![1, 3]);

        state.toggle_category("tech");
        assert_eq!(state.category(), Some("tech"));
        assert!(state.apply(&posts).is_empty());
    }

    #[test]
    fn toggling_the_same_category_twice_deselects_it() {
        let mut state = FilterState::default();
        state.toggle_category("Tech");
        assert_eq!(state.category(), Some("Tech"));
        state.toggle_category("Tech");
        assert_eq!(state.category(), None);
    }

    #[test]
    fn filter_changes_reset_the_page() {
        let mut state = FilterState::default();
        state.set_page(4);
        state.set_search("rust");
        assert_eq!(state.page(), 1);

        state.set_page(3);
        state.toggle_category("Tech");
        assert_eq!(state.page(), 1);

        state.set_page(2);
        state.select_archive("2024-03");
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn archive_selection_clears_search_and_category() {
        let mut state = FilterState::default();
        state.set_search("rust");
        state.toggle_category("Tech");
        state.select_archive("2024-03");

        assert_eq!(state.search(), "");
        assert_eq!(state.category(), None);
        assert_eq!(state.archive(), Some("2024-03"));
    }

    #[test]
    fn setting_a_search_leaves_the_archive_path() {
        let mut state = FilterState::default();
        state.select_archive("2024-03");
        state.set_search("rust");
        assert_eq!(state.archive(), None);
    }

    #[test]
    fn archive_filters_by_month_bucket() {
        let mut posts = snapshot();
        posts[1].date = datetime!(2023-12-25 10:00 UTC);
        let mut state = FilterState::default();
        state.select_archive("2023-12");
        let ids: Vec<u64> = state.apply(&posts).iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn page_floor_is_one() {
        let mut state = FilterState::default();
        state.set_page(0);
        assert_eq!(state.page(), 1);
    }
}

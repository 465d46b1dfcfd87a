//! Pure aggregations and selections derived from the full snapshot.
//!
//! Every function here reads the snapshot and returns a fresh value; nothing
//! mutates the posts. Sidebar aggregations (categories, archives, popular)
//! always work on the unfiltered snapshot regardless of the active listing
//! filter.

use std::collections::BTreeMap;

use crate::domain::posts::Post;
use crate::util::dates;

/// One category entry of the sidebar, counted over the whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
    /// Whether this category is the active listing filter.
    pub active: bool,
}

/// Category occurrence counts in first-appearance order.
pub fn category_counts(snapshot: &[Post], active: Option<&str>) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for post in snapshot {
        match counts.iter_mut().find(|entry| entry.name == post.category) {
            Some(entry) => entry.count += 1,
            None => counts.push(CategoryCount {
                name: post.category.clone(),
                count: 1,
                active: active == Some(post.category.as_str()),
            }),
        }
    }
    counts
}

/// One month/year archive bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveBucket {
    /// Sortable period key, `YYYY-MM`.
    pub key: String,
    /// French display label, e.g. `janvier 2024`.
    pub label: String,
    pub count: usize,
}

/// Month/year buckets over the whole snapshot, most recent period first,
/// truncated to `limit` periods. Ordering follows the numeric key, never the
/// label.
pub fn archive_buckets(snapshot: &[Post], limit: usize) -> Vec<ArchiveBucket> {
    let mut map: BTreeMap<String, (String, usize)> = BTreeMap::new();

    for post in snapshot {
        let key = dates::month_key(post.date);
        let label = dates::month_label(post.date);
        map.entry(key)
            .and_modify(|entry| entry.1 += 1)
            .or_insert((label, 1));
    }

    map.into_iter()
        .rev()
        .take(limit)
        .map(|(key, (label, count))| ArchiveBucket { key, label, count })
        .collect()
}

/// Posts flagged popular, by views descending. The sort is stable, so ties
/// keep snapshot order. `None` leaves the ranking unbounded.
pub fn popular_posts<'a>(snapshot: &'a [Post], limit: Option<usize>) -> Vec<&'a Post> {
    let mut popular: Vec<&Post> = snapshot.iter().filter(|post| post.popular).collect();
    popular.sort_by(|a, b| b.views.cmp(&a.views));
    if let Some(limit) = limit {
        popular.truncate(limit);
    }
    popular
}

/// The lead story: maximum `date`, first-in-snapshot on ties.
pub fn most_recent(snapshot: &[Post]) -> Option<&Post> {
    snapshot.iter().reduce(|best, candidate| {
        if candidate.date > best.date {
            candidate
        } else {
            best
        }
    })
}

/// Homepage rail: newest first, excluding the lead story itself.
pub fn recent_posts<'a>(snapshot: &'a [Post], limit: usize) -> Vec<&'a Post> {
    let mut sorted: Vec<&Post> = snapshot.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.into_iter().skip(1).take(limit).collect()
}

/// Up to `limit` other posts shown beside an article, in snapshot order.
pub fn related_posts<'a>(snapshot: &'a [Post], article_id: u64, limit: usize) -> Vec<&'a Post> {
    snapshot
        .iter()
        .filter(|post| post.id != article_id)
        .take(limit)
        .collect()
}

use serde::{Deserialize, Serialize};

use super::movie::MovieId;

/// Search-frequency document kept by the analytics store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    #[serde(rename = "$id")]
    pub document_id: String,
    #[serde(rename = "searchTerm")]
    pub search_term: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub movie_id: Option<MovieId>,
    #[serde(default)]
    pub title: Option<String>,
}

impl TrendingEntry {
    #[must_use]
    pub fn has_poster(&self) -> bool {
        self.poster_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Drops entries without a poster, orders by count (highest first) and keeps
/// the first `limit`. Ties keep their original order.
#[must_use]
pub fn rank_trending(entries: Vec<TrendingEntry>, limit: usize) -> Vec<TrendingEntry> {
    let mut ranked: Vec<TrendingEntry> = entries
        .into_iter()
        .filter(TrendingEntry::has_poster)
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

//! Search analytics: per-term counters kept in a remote document collection.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::clients::appwrite::{AppwriteClient, Query};
use crate::models::format::poster_url;
use crate::models::{Movie, MovieId, TrendingEntry, rank_trending};

const SEARCH_TERM_FIELD: &str = "searchTerm";
const COUNT_FIELD: &str = "count";

/// What happened to the counter for a search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Incremented,
    Created,
    /// No document existed and the top result lacked a poster, id or title.
    Skipped,
}

#[async_trait::async_trait]
pub trait SearchAnalytics: Send + Sync {
    async fn record_search(&self, term: &str, top_result: &Movie) -> Result<RecordOutcome>;

    /// Postered entries ordered by count, at most `limit`.
    async fn trending(&self, limit: usize) -> Result<Vec<TrendingEntry>>;
}

/// Lower-cased and trimmed form used as the document key.
#[must_use]
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

#[derive(Serialize)]
struct NewSearchDocument<'a> {
    #[serde(rename = "searchTerm")]
    search_term: &'a str,
    count: u64,
    poster_url: String,
    movie_id: &'a MovieId,
    title: &'a str,
}

#[derive(Serialize)]
struct CountUpdate {
    count: u64,
}

pub struct AppwriteAnalytics {
    client: AppwriteClient,
    image_base_url: String,
}

impl AppwriteAnalytics {
    #[must_use]
    pub fn new(client: AppwriteClient, image_base_url: impl Into<String>) -> Self {
        Self {
            client,
            image_base_url: image_base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl SearchAnalytics for AppwriteAnalytics {
    async fn record_search(&self, term: &str, top_result: &Movie) -> Result<RecordOutcome> {
        let term = normalize_term(term);
        if term.is_empty() {
            return Ok(RecordOutcome::Skipped);
        }

        let existing = self
            .client
            .list_documents::<TrendingEntry>(&[Query::equal(SEARCH_TERM_FIELD, &term)])
            .await?;

        if let Some(doc) = existing.documents.into_iter().next() {
            let count = doc.count.saturating_add(1);
            let _: TrendingEntry = self
                .client
                .update_document(&doc.document_id, &CountUpdate { count })
                .await?;

            debug!(term = %term, count, "Search count incremented");
            return Ok(RecordOutcome::Incremented);
        }

        let title = top_result.title.trim();
        let poster = poster_url(&self.image_base_url, top_result.poster_path.as_deref())
            .filter(|_| !title.is_empty());

        let Some(poster_url) = poster else {
            warn!(
                term = %term,
                movie_id = %top_result.id,
                "Top result has no poster or title, skipping analytics write"
            );
            return Ok(RecordOutcome::Skipped);
        };

        let document = NewSearchDocument {
            search_term: &term,
            count: 1,
            poster_url,
            movie_id: &top_result.id,
            title,
        };

        let _: TrendingEntry = self.client.create_document(&document).await?;
        info!(term = %term, movie_id = %top_result.id, "Search term recorded");
        Ok(RecordOutcome::Created)
    }

    async fn trending(&self, limit: usize) -> Result<Vec<TrendingEntry>> {
        let documents = self
            .client
            .list_all_documents::<TrendingEntry>(&[Query::OrderDesc(COUNT_FIELD.to_string())])
            .await?;
        debug!(total = documents.len(), "Fetched search analytics documents");
        Ok(rank_trending(documents, limit))
    }
}

/// Used when no analytics backend is configured.
pub struct DisabledAnalytics;

#[async_trait::async_trait]
impl SearchAnalytics for DisabledAnalytics {
    async fn record_search(&self, _term: &str, _top_result: &Movie) -> Result<RecordOutcome> {
        Ok(RecordOutcome::Skipped)
    }

    async fn trending(&self, _limit: usize) -> Result<Vec<TrendingEntry>> {
        Ok(Vec::new())
    }
}

//! Movie discovery: search vs. popular listing, trending, detail pages.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

use super::analytics::SearchAnalytics;
use super::catalog::MovieCatalog;
use crate::models::{Movie, MovieDetails, MovieId, TrendingEntry};

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Failed to fetch movies: {0}")]
    Fetch(String),

    #[error("Movie not found.")]
    NotFound(MovieId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Search,
    Popular,
}

impl ListingKind {
    /// `Search` for a non-blank query, `Popular` otherwise.
    #[must_use]
    pub fn for_query(query: Option<&str>) -> Self {
        if query.is_some_and(|q| !q.trim().is_empty()) {
            Self::Search
        } else {
            Self::Popular
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Popular => "popular",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MovieListing {
    pub kind: ListingKind,
    /// Trimmed query when `kind` is `Search`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub movies: Vec<Movie>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoviePage {
    pub details: MovieDetails,
    pub trailer_url: Option<String>,
}

pub struct DiscoveryService {
    catalog: Arc<dyn MovieCatalog>,
    analytics: Arc<dyn SearchAnalytics>,
    trending_limit: usize,
}

impl DiscoveryService {
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        analytics: Arc<dyn SearchAnalytics>,
        trending_limit: usize,
    ) -> Self {
        Self {
            catalog,
            analytics,
            trending_limit,
        }
    }

    /// Searches when `query` has non-blank text, otherwise lists popular titles.
    ///
    /// A successful search with results is recorded in analytics. Analytics
    /// failures are logged and do not affect the listing.
    pub async fn load_movies(&self, query: Option<&str>) -> Result<MovieListing, DiscoveryError> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());

        let Some(query) = query else {
            let movies = self.catalog.discover_popular().await.map_err(|e| {
                error!(error = %e, "Error fetching popular movies");
                metrics::counter!("catalog_requests_failed_total", "kind" => "popular")
                    .increment(1);
                DiscoveryError::Fetch(e.to_string())
            })?;

            return Ok(MovieListing {
                kind: ListingKind::Popular,
                query: None,
                movies,
            });
        };

        let movies = self.catalog.search_movies(query).await.map_err(|e| {
            error!(query = %query, error = %e, "Error fetching movies");
            metrics::counter!("catalog_requests_failed_total", "kind" => "search").increment(1);
            DiscoveryError::Fetch(e.to_string())
        })?;

        metrics::counter!("searches_total").increment(1);

        if let Some(top) = movies.first() {
            if let Err(e) = self.analytics.record_search(query, top).await {
                warn!(query = %query, error = %e, "Failed to update search analytics");
            }
        } else {
            info!(query = %query, "Search returned no results");
        }

        Ok(MovieListing {
            kind: ListingKind::Search,
            query: Some(query.to_string()),
            movies,
        })
    }

    /// Empty on failure.
    pub async fn trending(&self) -> Vec<TrendingEntry> {
        match self.analytics.trending(self.trending_limit).await {
            Ok(entries) => entries,
            Err(e) => {
                error!(error = %e, "Error fetching trending movies");
                Vec::new()
            }
        }
    }

    pub async fn movie_page(&self, id: &MovieId) -> Result<MoviePage, DiscoveryError> {
        let details = match self.catalog.movie_details(id).await {
            Ok(Some(details)) => details,
            Ok(None) => return Err(DiscoveryError::NotFound(id.clone())),
            Err(e) => {
                error!(movie_id = %id, error = %e, "Error fetching movie details");
                return Err(DiscoveryError::NotFound(id.clone()));
            }
        };

        let trailer_url = match self.catalog.find_trailer(id).await {
            Ok(url) => url,
            Err(e) => {
                warn!(movie_id = %id, error = %e, "Error fetching trailer");
                None
            }
        };

        Ok(MoviePage {
            details,
            trailer_url,
        })
    }

    /// Catalog record for `id`, used when favoriting by id alone.
    pub async fn movie(&self, id: &MovieId) -> Result<MovieDetails, DiscoveryError> {
        match self.catalog.movie_details(id).await {
            Ok(Some(details)) => Ok(details),
            Ok(None) => Err(DiscoveryError::NotFound(id.clone())),
            Err(e) => Err(DiscoveryError::Fetch(e.to_string())),
        }
    }
}

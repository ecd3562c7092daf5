//! Movie catalog seam.
//!
//! Services talk to the catalog through [`MovieCatalog`] so they can run
//! against an in-process fake in tests.

use anyhow::Result;

use crate::clients::tmdb::TmdbClient;
use crate::models::{Movie, MovieDetails, MovieId, Video, pick_trailer};

#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn search_movies(&self, query: &str) -> Result<Vec<Movie>>;

    /// Titles ordered by popularity.
    async fn discover_popular(&self) -> Result<Vec<Movie>>;

    /// `Ok(None)` when the catalog has no such movie.
    async fn movie_details(&self, id: &MovieId) -> Result<Option<MovieDetails>>;

    async fn movie_videos(&self, id: &MovieId) -> Result<Vec<Video>>;

    /// Watch URL of the first YouTube trailer.
    async fn find_trailer(&self, id: &MovieId) -> Result<Option<String>> {
        let videos = self.movie_videos(id).await?;
        Ok(pick_trailer(&videos))
    }
}

#[async_trait::async_trait]
impl MovieCatalog for TmdbClient {
    async fn search_movies(&self, query: &str) -> Result<Vec<Movie>> {
        Self::search_movies(self, query).await
    }

    async fn discover_popular(&self) -> Result<Vec<Movie>> {
        Self::discover_popular(self).await
    }

    async fn movie_details(&self, id: &MovieId) -> Result<Option<MovieDetails>> {
        Self::movie_details(self, id).await
    }

    async fn movie_videos(&self, id: &MovieId) -> Result<Vec<Video>> {
        Self::movie_videos(self, id).await
    }
}

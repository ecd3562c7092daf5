use anyhow::Result;
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::TmdbConfig;
use crate::constants::tmdb;
use crate::models::{Movie, MovieDetails, MovieId, Video};

#[derive(Debug, Deserialize)]
struct ResultsPage<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(client: Client, config: &TmdbConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
        }
    }

    pub async fn search_movies(&self, query: &str) -> Result<Vec<Movie>> {
        let url = format!("{}/search/movie", self.base_url);
        let page: ResultsPage<Movie> = self.get_json(&url, &[("query", query)]).await?;

        debug!(query = %query, results = page.results.len(), "TMDB search completed");
        Ok(page.results)
    }

    pub async fn discover_popular(&self) -> Result<Vec<Movie>> {
        let url = format!("{}/discover/movie", self.base_url);
        let page: ResultsPage<Movie> = self
            .get_json(&url, &[("sort_by", tmdb::POPULARITY_SORT)])
            .await?;

        debug!(results = page.results.len(), "TMDB discover completed");
        Ok(page.results)
    }

    /// `None` when the catalog does not know the id. TMDB ids are numeric, so
    /// anything else is unknown without a request.
    pub async fn movie_details(&self, id: &MovieId) -> Result<Option<MovieDetails>> {
        if id.as_number().is_none() {
            debug!(id = %id, "Skipping TMDB lookup for non-numeric id");
            return Ok(None);
        }

        let url = self.movie_url(id, &[])?;
        let response = self
            .request(url.as_str())
            .query(&[("language", self.language.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::check_status(response).await?;
        Ok(Some(response.json().await?))
    }

    pub async fn movie_videos(&self, id: &MovieId) -> Result<Vec<Video>> {
        if id.as_number().is_none() {
            return Ok(Vec::new());
        }

        let url = self.movie_url(id, &["videos"])?;
        let page: ResultsPage<Video> = self
            .get_json(url.as_str(), &[("language", self.language.as_str())])
            .await?;

        Ok(page.results)
    }

    /// `{base}/movie/{id}/{rest..}` with every segment percent-encoded.
    fn movie_url(&self, id: &MovieId, rest: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| anyhow::anyhow!("Invalid TMDB base URL: {}", self.base_url))?
            .pop_if_empty()
            .push("movie")
            .push(id.as_str())
            .extend(rest);
        Ok(url)
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .query(&[("api_key", self.api_key.as_str())])
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, params: &[(&str, &str)]) -> Result<T> {
        let response = self.request(url).query(params).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        debug!(status = %status, body = %body, "TMDB request failed");
        Err(anyhow::anyhow!("Network response was not ok: {}", status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = TmdbConfig {
            base_url: "http://localhost:9999/3/".to_string(),
            ..TmdbConfig::default()
        };
        let client = TmdbClient::new(Client::new(), &config);
        assert_eq!(client.base_url, "http://localhost:9999/3");
    }

    #[test]
    fn test_movie_url_encodes_id_as_one_segment() {
        let config = TmdbConfig {
            base_url: "http://localhost:9999/3".to_string(),
            ..TmdbConfig::default()
        };
        let client = TmdbClient::new(Client::new(), &config);

        let url = client
            .movie_url(&MovieId::from(550u64), &["videos"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9999/3/movie/550/videos");

        let hostile = MovieId::parse("../discover/movie?sort_by=x&").unwrap();
        let url = client.movie_url(&hostile, &[]).unwrap();
        assert_eq!(url.path_segments().unwrap().count(), 3);
        assert!(url.query().is_none());
    }

    #[test]
    fn test_results_page_without_results() {
        let page: ResultsPage<Movie> = serde_json::from_str(r#"{"page": 1}"#).unwrap();
        assert!(page.results.is_empty());
    }
}

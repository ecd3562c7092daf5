//! Request spans and Prometheus metrics for the JSON API.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::api::AppState;
use crate::services::ListingKind;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Which part of the API a request hit. Used as a bounded metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Movies,
    MoviePage,
    Trending,
    Favorites,
    Favorite,
    Health,
    Metrics,
    Unmatched,
}

impl Endpoint {
    fn from_route(route: Option<&str>) -> Self {
        match route {
            Some("/api/movies") => Self::Movies,
            Some("/api/movies/{id}") => Self::MoviePage,
            Some("/api/trending") => Self::Trending,
            Some("/api/favorites") => Self::Favorites,
            Some("/api/favorites/{id}") => Self::Favorite,
            Some("/api/health") => Self::Health,
            Some("/metrics") => Self::Metrics,
            _ => Self::Unmatched,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Movies => "movies",
            Self::MoviePage => "movie_page",
            Self::Trending => "trending",
            Self::Favorites => "favorites",
            Self::Favorite => "favorite",
            Self::Health => "health",
            Self::Metrics => "metrics",
            Self::Unmatched => "unmatched",
        }
    }

    const fn takes_movie_id(self) -> bool {
        matches!(self, Self::MoviePage | Self::Favorite)
    }
}

/// Listing kind a `/api/movies` request will produce, read from its query string.
fn listing_for(query_string: Option<&str>) -> ListingKind {
    let term = query_string.and_then(|qs| {
        url::form_urlencoded::parse(qs.as_bytes())
            .find(|(key, _)| key == "query")
            .map(|(_, value)| value.into_owned())
    });
    ListingKind::for_query(term.as_deref())
}

/// Last path segment, still percent-encoded.
fn movie_id_segment(path: &str) -> Option<&str> {
    path.rsplit('/').next().filter(|s| !s.is_empty())
}

pub async fn track_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let endpoint = Endpoint::from_route(req.extensions().get::<MatchedPath>().map(MatchedPath::as_str));
    let method = req.method().to_string();
    let movie_id = endpoint
        .takes_movie_id()
        .then(|| movie_id_segment(req.uri().path()).map(str::to_owned))
        .flatten();
    let listing = (endpoint == Endpoint::Movies).then(|| listing_for(req.uri().query()));

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %method,
        endpoint = endpoint.as_str(),
        movie_id = movie_id.as_deref(),
        listing = listing.map(ListingKind::as_str),
    );

    async move {
        let response = next.run(req).await;
        let status = response.status();
        let elapsed = start.elapsed();

        metrics::counter!(
            "api_requests_total",
            "endpoint" => endpoint.as_str(),
            "method" => method,
            "status" => status.as_u16().to_string(),
        )
        .increment(1);
        metrics::histogram!("api_request_duration_seconds", "endpoint" => endpoint.as_str())
            .record(elapsed.as_secs_f64());

        if let Some(kind) = listing
            && status.is_success()
        {
            metrics::counter!("movie_listings_served_total", "kind" => kind.as_str()).increment(1);
        }

        let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if status.is_server_error() {
            warn!(status_code = status.as_u16(), duration_ms, "Request failed");
        } else {
            info!(status_code = status.as_u16(), duration_ms, "Request finished");
        }

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_labels_are_bounded() {
        assert_eq!(Endpoint::from_route(Some("/api/movies/{id}")), Endpoint::MoviePage);
        assert_eq!(Endpoint::from_route(Some("/api/favorites")), Endpoint::Favorites);
        assert_eq!(Endpoint::from_route(Some("/api/movies/27205")), Endpoint::Unmatched);
        assert_eq!(Endpoint::from_route(None), Endpoint::Unmatched);
        assert!(Endpoint::Favorite.takes_movie_id());
        assert!(!Endpoint::Trending.takes_movie_id());
    }

    #[test]
    fn test_listing_follows_query_parameter() {
        assert_eq!(listing_for(Some("query=inception")), ListingKind::Search);
        assert_eq!(listing_for(Some("query=%20%20")), ListingKind::Popular);
        assert_eq!(listing_for(Some("page=2")), ListingKind::Popular);
        assert_eq!(listing_for(None), ListingKind::Popular);
    }

    #[test]
    fn test_movie_id_segment() {
        assert_eq!(movie_id_segment("/api/movies/27205"), Some("27205"));
        assert_eq!(movie_id_segment("/api/favorites/doc-7"), Some("doc-7"));
        assert_eq!(movie_id_segment("/api/movies/"), None);
    }
}

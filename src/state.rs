use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::clients::appwrite::AppwriteClient;
use crate::clients::tmdb::TmdbClient;
use crate::config::Config;
use crate::constants::favorites::STORAGE_KEY;
use crate::favorites::{FavoritesStorage, FavoritesStore, JsonFileStorage};
use crate::services::{
    AppwriteAnalytics, DisabledAnalytics, DiscoveryService, MovieCatalog, SearchAnalytics,
};

/// Build a shared HTTP client with reasonable defaults for API calls.
/// This client should be reused across all HTTP-based services to enable
/// connection pooling and avoid socket exhaustion.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(concat!("cinefind/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub discovery: Arc<DiscoveryService>,

    pub favorites: Arc<Mutex<FavoritesStore>>,
}

impl SharedState {
    /// Wires the TMDB client, the analytics backend and the file-backed
    /// favorites store from `config`.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.tmdb.request_timeout_seconds)?;

        let catalog: Arc<dyn MovieCatalog> =
            Arc::new(TmdbClient::new(http_client.clone(), &config.tmdb));

        let analytics: Arc<dyn SearchAnalytics> = if config.analytics.enabled {
            info!(
                endpoint = %config.analytics.endpoint,
                collection = %config.analytics.collection_id,
                "Search analytics enabled"
            );
            let client = AppwriteClient::new(http_client, &config.analytics);
            Arc::new(AppwriteAnalytics::new(
                client,
                config.tmdb.image_base_url.clone(),
            ))
        } else {
            Arc::new(DisabledAnalytics)
        };

        let storage = JsonFileStorage::new(config.data_dir(), STORAGE_KEY);

        Ok(Self::from_parts(config, catalog, analytics, storage))
    }

    pub fn from_parts(
        config: Config,
        catalog: Arc<dyn MovieCatalog>,
        analytics: Arc<dyn SearchAnalytics>,
        storage: impl FavoritesStorage + 'static,
    ) -> Self {
        let discovery = Arc::new(DiscoveryService::new(
            catalog,
            analytics,
            config.search.trending_limit,
        ));
        let favorites = Arc::new(Mutex::new(FavoritesStore::initialize(storage)));

        Self {
            config: Arc::new(config),
            discovery,
            favorites,
        }
    }

    #[must_use]
    pub fn image_base_url(&self) -> &str {
        &self.config.tmdb.image_base_url
    }
}

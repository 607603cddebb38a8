// ABOUTME: HTTP client for the agent catalog endpoint
// ABOUTME: Soft-fails to an empty list so the caller always has something to render

use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, warn};

use meshport_cache::{CacheConfig, Clock, TtlCache};

use crate::error::{CatalogError, CatalogResult};
use crate::types::{normalize, Agent, AgentsPayload};

/// Catalog responses are cached for five minutes by default
pub const DEFAULT_CACHE_TTL_SECS: u64 = 5 * 60;

/// Configuration for [`CatalogClient`]
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base path of the backend API, e.g. `https://host/api`
    pub base_url: String,
    pub cache: CacheConfig,
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            cache: CacheConfig {
                ttl: std::time::Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
                key_prefix: "agents".to_string(),
                ..CacheConfig::default()
            },
        }
    }
}

/// Client for the agent catalog
pub struct CatalogClient {
    http: Client,
    base_url: String,
    cache: TtlCache<Vec<Agent>>,
}

impl CatalogClient {
    pub fn new(config: CatalogConfig) -> Self {
        let cache = TtlCache::new(config.cache.clone());
        Self::with_cache(config, cache)
    }

    /// Create a client whose cache uses an injected clock
    pub fn with_clock(config: CatalogConfig, clock: Arc<dyn Clock>) -> Self {
        let cache = TtlCache::with_clock(config.cache.clone(), clock);
        Self::with_cache(config, cache)
    }

    fn with_cache(config: CatalogConfig, cache: TtlCache<Vec<Agent>>) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache,
        }
    }

    /// Fetch the normalized agent catalog, degrading to an empty list
    ///
    /// Any failure is logged and swallowed so the caller can always render.
    pub async fn fetch_agents(&self) -> Vec<Agent> {
        match self.try_fetch_agents().await {
            Ok(agents) => agents,
            Err(error) => {
                warn!("Failed to fetch agents: {}", error);
                Vec::new()
            }
        }
    }

    /// Fetch the normalized agent catalog, surfacing failures
    pub async fn try_fetch_agents(&self) -> CatalogResult<Vec<Agent>> {
        let key = self.cache.key(&["all"]);
        self.cache
            .get_or_fetch(&key, || self.request_agents())
            .await
    }

    async fn request_agents(&self) -> CatalogResult<Vec<Agent>> {
        let url = format!("{}/agents", self.base_url);
        debug!("Fetching agent catalog from {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CatalogError::Http(response.status().as_u16()));
        }

        let payload: AgentsPayload = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        Ok(normalize(payload))
    }
}

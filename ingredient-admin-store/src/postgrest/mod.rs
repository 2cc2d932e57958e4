//! PostgREST record store (Supabase-style hosted tables)

mod error;
mod http;
mod store;
mod types;

use reqwest::Client;

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::http_client::create_http_client;
use crate::utils::log_sanitizer::mask_secret;

pub(crate) use types::PostgrestErrorBody;

pub(crate) const STORE_NAME: &str = "postgrest";

/// Record store backed by a PostgREST endpoint (`{url}/rest/v1/{table}`).
pub struct PostgrestStore {
    pub(crate) client: Client,
    pub(crate) config: StoreConfig,
}

impl PostgrestStore {
    /// Build a store from connection settings.
    ///
    /// # Errors
    /// Returns `NetworkError` if the HTTP client cannot be constructed.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let client = create_http_client(config.connect_timeout(), config.request_timeout())?;
        log::debug!(
            "[{STORE_NAME}] Store created for {} (api key {})",
            config.rest_base(),
            mask_secret(&config.api_key)
        );
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl std::fmt::Debug for PostgrestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestStore")
            .field("url", &self.config.url)
            .field("api_key", &mask_secret(&self.config.api_key))
            .finish_non_exhaustive()
    }
}

//! Shared application state.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::AdminConfig;

/// Cheaply cloneable handle to everything handlers need.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    api: ApiClient,
}

impl AppState {
    /// Build the shared state, including the backend HTTP client.
    pub fn new(config: AdminConfig) -> Result<Self, reqwest::Error> {
        let api = ApiClient::new(&config.api)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { config, api }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }
}

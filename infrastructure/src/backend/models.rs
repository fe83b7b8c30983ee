//! HTTP model catalog (`/api/models`, `/api/provider`)

use async_trait::async_trait;
use scout_application::ports::model_catalog::{CatalogError, ModelCatalog};
use scout_domain::{ModelListing, ProviderInfo};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub struct HttpModelCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpModelCatalog {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Request(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| CatalogError::Request(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| CatalogError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ModelCatalog for HttpModelCatalog {
    async fn list_models(&self) -> Result<ModelListing, CatalogError> {
        self.get_json("/api/models").await
    }

    async fn provider_info(&self) -> Result<ProviderInfo, CatalogError> {
        self.get_json("/api/provider").await
    }
}

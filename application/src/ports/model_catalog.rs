//! Model catalog port
//!
//! The backend's companion HTTP endpoints: which models exist and which
//! provider is active.

use async_trait::async_trait;
use scout_domain::{ModelListing, ProviderInfo};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Unexpected status {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait ModelCatalog: Send + Sync {
    async fn list_models(&self) -> Result<ModelListing, CatalogError>;

    async fn provider_info(&self) -> Result<ProviderInfo, CatalogError>;
}

//! Load the model list and provider status from the backend.
//!
//! The catalog is optional: when it cannot be reached the built-in fallback
//! list is used and the failure is only logged.

use crate::ports::model_catalog::ModelCatalog;
use scout_domain::{ModelListing, ProviderInfo};
use std::sync::Arc;
use tracing::{info, warn};

/// What the UI needs after start-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelsLoaded {
    pub listing: ModelListing,
    /// `None` when the provider endpoint failed
    pub provider: Option<ProviderInfo>,
}

pub struct LoadModelsUseCase<C: ModelCatalog + ?Sized> {
    catalog: Arc<C>,
}

impl<C: ModelCatalog + ?Sized> LoadModelsUseCase<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    pub async fn execute(&self) -> ModelsLoaded {
        let listing = match self.catalog.list_models().await {
            Ok(listing) if listing.models.is_empty() => {
                warn!("Model catalog returned no models, using fallback list");
                ModelListing::fallback("backend returned an empty model list")
            }
            Ok(listing) => {
                info!(
                    "Loaded {} models from {}",
                    listing.models.len(),
                    listing.source
                );
                listing
            }
            Err(e) => {
                warn!("Failed to load models: {}", e);
                ModelListing::fallback(e.to_string())
            }
        };

        let provider = match self.catalog.provider_info().await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!("Failed to load provider info: {}", e);
                None
            }
        };

        ModelsLoaded { listing, provider }
    }
}

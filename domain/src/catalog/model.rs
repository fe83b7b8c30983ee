//! Models offered by the agent backend

use serde::{Deserialize, Serialize};

/// A selectable model (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Identifier sent to the backend, e.g. `models/gemini-2.5-pro`
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

impl ModelInfo {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            description: description.into(),
        }
    }
}

/// Built-in model list used when the backend cannot be asked
pub fn fallback_models() -> Vec<ModelInfo> {
    vec![
        ModelInfo::new(
            "models/gemini-2.5-flash",
            "Gemini 2.5 Flash",
            "Fast and efficient model for most tasks",
        ),
        ModelInfo::new(
            "models/gemini-2.5-pro",
            "Gemini 2.5 Pro",
            "Most capable model for complex tasks",
        ),
        ModelInfo::new(
            "models/gemini-2.0-flash",
            "Gemini 2.0 Flash",
            "Fast experimental model",
        ),
    ]
}

/// Result of a model listing, including where it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelListing {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
    /// e.g. `google_api`, `openrouter_api`, `fallback`
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ModelListing {
    pub const FALLBACK_SOURCE: &'static str = "fallback";

    /// The built-in list, remembering why it was needed
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            models: fallback_models(),
            source: Self::FALLBACK_SOURCE.to_string(),
            provider: None,
            error: Some(reason.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == Self::FALLBACK_SOURCE
    }
}

/// Active provider reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub active_provider: String,
    #[serde(default)]
    pub has_api_key: bool,
}

/// The model selector: a non-empty list plus the current choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSelector {
    models: Vec<ModelInfo>,
    selected: usize,
}

impl Default for ModelSelector {
    fn default() -> Self {
        Self::new(fallback_models())
    }
}

impl ModelSelector {
    /// An empty list is replaced by [`fallback_models`]
    pub fn new(models: Vec<ModelInfo>) -> Self {
        let models = if models.is_empty() {
            fallback_models()
        } else {
            models
        };
        Self {
            models,
            selected: 0,
        }
    }

    /// Swap in a new list, keeping the current choice when it is still offered
    pub fn replace(&mut self, models: Vec<ModelInfo>) {
        let current = self.current().name.clone();
        *self = Self::new(models);
        self.select_by_name(&current);
    }

    /// Select by `name` or `display_name` (case-insensitive). Returns whether it matched.
    pub fn select_by_name(&mut self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        match self.models.iter().position(|m| {
            m.name.to_lowercase() == wanted
                || m.display_name.to_lowercase() == wanted
                || m.name.to_lowercase().trim_start_matches("models/") == wanted
        }) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.models.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + self.models.len() - 1) % self.models.len();
    }

    pub fn current(&self) -> &ModelInfo {
        &self.models[self.selected]
    }

    pub fn models(&self) -> &[ModelInfo] {
        &self.models
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_falls_back() {
        let selector = ModelSelector::new(vec![]);
        assert_eq!(selector.models(), fallback_models().as_slice());
        assert_eq!(selector.current().name, "models/gemini-2.5-flash");
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        let mut selector = ModelSelector::default();
        selector.select_prev();
        assert_eq!(selector.selected_index(), 2);
        selector.select_next();
        assert_eq!(selector.selected_index(), 0);
    }

    #[test]
    fn test_select_by_name_variants() {
        let mut selector = ModelSelector::default();
        assert!(selector.select_by_name("Gemini 2.5 Pro"));
        assert_eq!(selector.current().name, "models/gemini-2.5-pro");
        assert!(selector.select_by_name("gemini-2.0-flash"));
        assert_eq!(selector.selected_index(), 2);
        assert!(!selector.select_by_name("gpt-4o"));
        assert_eq!(selector.selected_index(), 2);
    }

    #[test]
    fn test_replace_keeps_current_choice() {
        let mut selector = ModelSelector::default();
        selector.select_by_name("models/gemini-2.5-pro");
        selector.replace(vec![
            ModelInfo::new("models/gemini-1.5", "Gemini 1.5", ""),
            ModelInfo::new("models/gemini-2.5-pro", "Gemini 2.5 Pro", ""),
        ]);
        assert_eq!(selector.current().name, "models/gemini-2.5-pro");
    }

    #[test]
    fn test_listing_deserializes_backend_payload() {
        let listing: ModelListing = serde_json::from_str(
            r#"{"models":[{"name":"openai/gpt-4o","display_name":"GPT-4o","description":"flagship"}],
                "source":"openrouter_api","provider":"openrouter","error":null}"#,
        )
        .unwrap();
        assert_eq!(listing.models.len(), 1);
        assert!(!listing.is_fallback());
        assert_eq!(listing.provider.as_deref(), Some("openrouter"));
    }

    #[test]
    fn test_fallback_listing() {
        let listing = ModelListing::fallback("connection refused");
        assert!(listing.is_fallback());
        assert_eq!(listing.error.as_deref(), Some("connection refused"));
        assert!(!listing.models.is_empty());
    }
}

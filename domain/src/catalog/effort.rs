//! Research effort level

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How hard the agent should research before answering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effort {
    Low,
    #[default]
    Medium,
    High,
}

/// Run parameters derived from an [`Effort`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResearchBudget {
    pub initial_search_query_count: u32,
    pub max_research_loops: u32,
}

impl Effort {
    pub const ALL: [Effort; 3] = [Effort::Low, Effort::Medium, Effort::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Effort::Low => "low",
            Effort::Medium => "medium",
            Effort::High => "high",
        }
    }

    pub fn budget(&self) -> ResearchBudget {
        let (initial_search_query_count, max_research_loops) = match self {
            Effort::Low => (1, 1),
            Effort::Medium => (3, 3),
            Effort::High => (5, 10),
        };
        ResearchBudget {
            initial_search_query_count,
            max_research_loops,
        }
    }

    /// Next level, wrapping from high back to low
    pub fn next(&self) -> Self {
        match self {
            Effort::Low => Effort::Medium,
            Effort::Medium => Effort::High,
            Effort::High => Effort::Low,
        }
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Effort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Effort::Low),
            "medium" | "med" => Ok(Effort::Medium),
            "high" => Ok(Effort::High),
            other => Err(DomainError::UnknownEffort(other.to_string())),
        }
    }
}

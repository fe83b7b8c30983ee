//! Agent backend adapters
//!
//! Talks to a LangGraph server: the run stream for turns
//! ([`LangGraphBackend`]) and the companion model/provider endpoints
//! ([`HttpModelCatalog`]).

pub mod langgraph;
pub mod models;
pub mod translate;

pub use langgraph::LangGraphBackend;
pub use models::HttpModelCatalog;

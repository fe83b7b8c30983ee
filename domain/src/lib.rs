//! Domain layer for scout
//!
//! This crate contains the entities and pure state machines behind the chat
//! view. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Conversation
//!
//! An ordered list of human and AI [`Message`]s plus the activity recorded
//! for each AI turn. While a turn streams, its steps collect in a *live*
//! list; when the turn settles they are archived under the AI message id.
//!
//! ## Activity
//!
//! Every agent step (query generation, web research, reflection, ...) is an
//! [`ActivityEvent`] with a title and an optional detail payload. Icons are
//! chosen from an ordered rule table, see [`activity::icon`].
//!
//! ## Reveal
//!
//! [`RevealState`] types out the final answer one character at a time even
//! when the backend delivers it as a single update.

pub mod activity;
pub mod catalog;
pub mod conversation;
pub mod core;
pub mod reveal;
pub mod turn;

// Re-export commonly used types
pub use activity::{
    event::{ActivityEvent, DetailLine, EventData, EventDetail},
    icon::{ActivityIcon, select_icon},
};
pub use catalog::{
    effort::{Effort, ResearchBudget},
    model::{ModelInfo, ModelListing, ModelSelector, ProviderInfo, fallback_models},
};
pub use conversation::{
    history::{Conversation, HistoricalActivity, SettledTurn},
    message::{Message, MessageId, Role},
};
pub use core::error::DomainError;
pub use reveal::{RevealState, RevealStep, TargetChange};
pub use turn::{TurnEvent, TurnRequest};

//! Conversation domain.
//!
//! - [`message::Message`]: a single human or AI message
//! - [`history::Conversation`]: host state: messages, live and archived activity

pub mod history;
pub mod message;

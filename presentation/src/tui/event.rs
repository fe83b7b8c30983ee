//! TUI event types
//!
//! Commands sent TO the controller task and events coming FROM background
//! tasks back into the select! loop.

use scout_application::ModelsLoaded;
use scout_domain::{Message, TurnEvent, TurnRequest};

/// Commands sent from the TUI event loop to the controller task (Actor inbox)
#[derive(Debug)]
pub enum TuiCommand {
    /// Start a turn. `history` already ends with the new human message.
    Submit {
        turn_id: u64,
        history: Vec<Message>,
        request: TurnRequest,
    },
    /// Abort the running turn, if any
    Cancel,
    /// Graceful shutdown
    Quit,
}

/// Events delivered to the select! loop
#[derive(Debug)]
pub enum TuiEvent {
    ModelsLoaded(ModelsLoaded),
    /// An event of the turn started with the same `turn_id`
    Turn { turn_id: u64, event: TurnEvent },
}

//! Conversation host state
//!
//! [`Conversation`] owns the ordered messages, the archived activity of every
//! finished AI turn and the live activity of the turn currently streaming.
//! Renderers only read it; all mutation goes through [`Conversation::apply`]
//! and the turn lifecycle methods.

use super::message::{Message, MessageId};
use crate::activity::event::ActivityEvent;
use crate::turn::TurnEvent;
use std::collections::HashMap;

/// Activity recorded for finished AI turns, keyed by the AI message id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalActivity {
    by_message: HashMap<MessageId, Vec<ActivityEvent>>,
}

impl HistoricalActivity {
    /// Events for a message; empty when none were recorded
    pub fn get(&self, id: &MessageId) -> &[ActivityEvent] {
        self.by_message.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn insert(&mut self, id: MessageId, events: Vec<ActivityEvent>) {
        self.by_message.insert(id, events);
    }

    pub fn is_empty(&self) -> bool {
        self.by_message.is_empty()
    }
}

/// Summary of a turn that just settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledTurn {
    /// AI message the live events were archived under, if any
    pub archived_under: Option<MessageId>,
    pub event_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    historical: HistoricalActivity,
    live: Vec<ActivityEvent>,
    in_progress: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn live_events(&self) -> &[ActivityEvent] {
        &self.live
    }

    pub fn historical(&self) -> &HistoricalActivity {
        &self.historical
    }

    /// Start a new turn with the user's message.
    ///
    /// The live list from the previous turn is cleared.
    pub fn begin_turn(&mut self, human: Message) {
        self.live.clear();
        self.push_message(human);
        self.in_progress = true;
    }

    /// Append a message unless one with the same id already exists.
    ///
    /// Returns whether it was appended.
    pub fn push_message(&mut self, message: Message) -> bool {
        if self.messages.iter().any(|m| m.id() == message.id()) {
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Merge a backend snapshot: unseen messages are appended in order,
    /// known ones are left untouched. Returns the number appended.
    pub fn merge_snapshot(&mut self, snapshot: Vec<Message>) -> usize {
        snapshot
            .into_iter()
            .map(|m| self.push_message(m))
            .filter(|appended| *appended)
            .count()
    }

    /// Append a step to the live list. Ignored when no turn is running.
    pub fn record_activity(&mut self, event: ActivityEvent) -> bool {
        if !self.in_progress {
            return false;
        }
        self.live.push(event);
        true
    }

    /// End the running turn, archiving live events under the last AI message
    pub fn settle(&mut self) -> SettledTurn {
        self.in_progress = false;
        let event_count = self.live.len();
        let archived_under = match self.messages.last() {
            Some(last) if last.is_ai() && !self.live.is_empty() => {
                let id = last.id().clone();
                self.historical.insert(id.clone(), self.live.clone());
                Some(id)
            }
            _ => None,
        };
        SettledTurn {
            archived_under,
            event_count,
        }
    }

    /// Apply a backend event. Returns the settle summary for terminal events.
    pub fn apply(&mut self, event: TurnEvent) -> Option<SettledTurn> {
        match event {
            TurnEvent::Activity(activity) => {
                self.record_activity(activity);
                None
            }
            TurnEvent::Messages(snapshot) => {
                self.merge_snapshot(snapshot);
                None
            }
            TurnEvent::Completed | TurnEvent::Cancelled | TurnEvent::Failed(_) => {
                if self.in_progress {
                    Some(self.settle())
                } else {
                    None
                }
            }
        }
    }

    /// Discard everything (new conversation)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Activity to show above the message at `index`, with its live flag.
    ///
    /// The most recent message of a running turn uses the live list; every
    /// other AI message uses its archived events. Human messages have none.
    pub fn timeline_for(&self, index: usize) -> Option<(&[ActivityEvent], bool)> {
        let message = self.messages.get(index)?;
        if !message.is_ai() {
            return None;
        }
        if self.in_progress && index + 1 == self.messages.len() {
            Some((self.live.as_slice(), true))
        } else {
            Some((self.historical.get(message.id()), false))
        }
    }

    /// A running turn that has not produced its AI message yet
    pub fn awaiting_ai_message(&self) -> bool {
        self.in_progress && !self.messages.last().is_some_and(Message::is_ai)
    }

    pub fn latest_ai_index(&self) -> Option<usize> {
        self.messages.iter().rposition(Message::is_ai)
    }

    /// Indices of all AI messages, oldest first
    pub fn ai_indices(&self) -> Vec<usize> {
        self.messages
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_ai())
            .map(|(i, _)| i)
            .collect()
    }
}

//! Transient "copied" feedback for AI turns

use scout_domain::MessageId;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct CopyFeedback {
    duration: Duration,
    copied: Option<(MessageId, Instant)>,
}

impl CopyFeedback {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            copied: None,
        }
    }

    /// Show the badge on `id` (replacing any other)
    pub fn mark(&mut self, id: MessageId, now: Instant) {
        self.copied = Some((id, now));
    }

    pub fn is_copied(&self, id: &MessageId, now: Instant) -> bool {
        match &self.copied {
            Some((copied, at)) => copied == id && now.duration_since(*at) < self.duration,
            None => false,
        }
    }

    /// Drop the badge once it is older than the feedback duration
    pub fn expire(&mut self, now: Instant) {
        if let Some((_, at)) = &self.copied
            && now.duration_since(*at) >= self.duration
        {
            self.copied = None;
        }
    }

    pub fn clear(&mut self) {
        self.copied = None;
    }

    pub fn is_active(&self) -> bool {
        self.copied.is_some()
    }
}

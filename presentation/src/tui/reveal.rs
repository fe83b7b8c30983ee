//! Progressive reveal driver
//!
//! Wraps [`RevealState`] with a single pending deadline. The select! loop
//! sleeps until [`ProgressiveReveal::pending_tick`] and hands the epoch back
//! to [`ProgressiveReveal::fire`]; replacing the target bumps the epoch, so
//! a wake-up scheduled for an older target does nothing.

use scout_domain::{RevealState, RevealStep, TargetChange};
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct ProgressiveReveal {
    state: RevealState,
    delay: Duration,
    deadline: Option<Instant>,
    epoch: u64,
    completions: u32,
}

impl ProgressiveReveal {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: RevealState::new(),
            delay,
            deadline: None,
            epoch: 0,
            completions: 0,
        }
    }

    /// Replace the target text.
    ///
    /// Returns true when this completed the reveal (a snap to the new text).
    pub fn set_target(&mut self, text: &str, now: Instant) -> bool {
        let change = self.state.set_target(text);
        if change == TargetChange::Unchanged {
            return false;
        }
        self.epoch += 1;
        self.deadline = self.state.needs_tick().then(|| now + self.delay);
        if change == TargetChange::Snapped {
            self.completions += 1;
            return true;
        }
        false
    }

    /// Next wake-up and the epoch it belongs to
    pub fn pending_tick(&self) -> Option<(Instant, u64)> {
        self.deadline.map(|deadline| (deadline, self.epoch))
    }

    /// Handle a wake-up. Stale epochs and early calls are ignored.
    pub fn fire(&mut self, epoch: u64, now: Instant) -> RevealStep {
        let Some(deadline) = self.deadline else {
            return RevealStep::Idle;
        };
        if epoch != self.epoch || now < deadline {
            return RevealStep::Idle;
        }
        let step = self.state.tick();
        self.deadline = self.state.needs_tick().then(|| now + self.delay);
        if step == RevealStep::Completed {
            self.completions += 1;
        }
        step
    }

    pub fn shown_text(&self) -> &str {
        self.state.shown_text()
    }

    /// How many times the shown text reached the full target
    pub fn completions(&self) -> u32 {
        self.completions
    }
}

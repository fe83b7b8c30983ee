//! Character-by-character reveal of a target text
//!
//! [`RevealState`] is the pure part of the typewriter effect: it knows how
//! much of the target is visible and how to react when the target changes.
//! Timing lives with the caller, which calls [`RevealState::tick`] once per
//! elapsed delay.
//!
//! Lengths are counted in `char`s so a visible prefix never splits a
//! multi-byte character.
//!
//! # Target replacement policy
//!
//! | situation | effect |
//! |---|---|
//! | identical target | nothing |
//! | shorter than what is shown | clear, restart from empty |
//! | still revealing | keep shown length, continue typing |
//! | finished, target differs | snap to the full new target |

/// What [`RevealState::set_target`] did with the new target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetChange {
    Unchanged,
    /// Shown output was discarded; typing restarts from empty
    Restarted,
    /// Typing continues toward the new target
    Retargeted,
    /// Reveal had finished; the new target is shown in full at once
    Snapped,
}

/// Outcome of a single [`RevealState::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// Nothing to do
    Idle,
    /// One more character became visible
    Advanced,
    /// The shown prefix reached the full target
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    target: String,
    target_len: usize,
    shown: usize,
    /// Typing toward the target; cleared once the target has been reached
    armed: bool,
}

impl Default for RevealState {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealState {
    /// A reveal waiting for its first text
    pub fn new() -> Self {
        Self {
            target: String::new(),
            target_len: 0,
            shown: 0,
            armed: true,
        }
    }

    /// Start revealing `text` from empty
    pub fn with_target(text: impl Into<String>) -> Self {
        let mut state = Self::new();
        state.set_target(text);
        state
    }

    pub fn set_target(&mut self, text: impl Into<String>) -> TargetChange {
        let text = text.into();
        if text == self.target {
            return TargetChange::Unchanged;
        }
        let new_len = text.chars().count();
        self.target = text;
        self.target_len = new_len;

        if new_len < self.shown {
            self.shown = 0;
            self.armed = true;
            TargetChange::Restarted
        } else if self.armed {
            TargetChange::Retargeted
        } else {
            self.shown = new_len;
            TargetChange::Snapped
        }
    }

    /// Advance by one character.
    ///
    /// An empty target never completes: there is no transition to make.
    pub fn tick(&mut self) -> RevealStep {
        if !self.armed || self.target_len == 0 {
            return RevealStep::Idle;
        }
        if self.shown < self.target_len {
            self.shown += 1;
        }
        if self.shown == self.target_len {
            self.armed = false;
            RevealStep::Completed
        } else {
            RevealStep::Advanced
        }
    }

    /// Whether another [`tick`](Self::tick) would change anything
    pub fn needs_tick(&self) -> bool {
        self.armed && self.target_len > 0
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of visible characters
    pub fn shown_len(&self) -> usize {
        self.shown
    }

    /// The visible prefix of the target
    pub fn shown_text(&self) -> &str {
        let end = self
            .target
            .char_indices()
            .nth(self.shown)
            .map(|(i, _)| i)
            .unwrap_or(self.target.len());
        &self.target[..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_completion(state: &mut RevealState) -> (usize, usize) {
        let mut ticks = 0;
        let mut completions = 0;
        while state.needs_tick() {
            ticks += 1;
            if state.tick() == RevealStep::Completed {
                completions += 1;
            }
        }
        (ticks, completions)
    }

    #[test]
    fn test_reveals_one_char_per_tick() {
        let mut state = RevealState::with_target("Hello world");
        assert_eq!(state.shown_text(), "");

        assert_eq!(state.tick(), RevealStep::Advanced);
        assert_eq!(state.shown_text(), "H");
        assert_eq!(state.tick(), RevealStep::Advanced);
        assert_eq!(state.shown_text(), "He");
    }

    #[test]
    fn test_completes_after_exactly_target_len_ticks() {
        let mut state = RevealState::with_target("Hello world");
        let (ticks, completions) = run_to_completion(&mut state);

        assert_eq!(ticks, "Hello world".len());
        assert_eq!(completions, 1);
        assert_eq!(state.shown_text(), "Hello world");
        assert!(!state.needs_tick());

        // Further ticks are inert
        assert_eq!(state.tick(), RevealStep::Idle);
    }

    #[test]
    fn test_empty_target_never_completes() {
        let mut state = RevealState::new();
        assert!(!state.needs_tick());
        assert_eq!(state.set_target(""), TargetChange::Unchanged);
        assert!(!state.needs_tick());
        for _ in 0..5 {
            assert_eq!(state.tick(), RevealStep::Idle);
        }
        assert_eq!(state.shown_text(), "");
    }

    #[test]
    fn test_shrink_restarts_from_empty() {
        let mut state = RevealState::with_target("Hello world");
        run_to_completion(&mut state);

        assert_eq!(state.set_target("Hi"), TargetChange::Restarted);
        assert_eq!(state.shown_text(), "");
        assert!(state.needs_tick());

        assert_eq!(state.tick(), RevealStep::Advanced);
        assert_eq!(state.shown_text(), "H");
        assert_eq!(state.tick(), RevealStep::Completed);
        assert_eq!(state.shown_text(), "Hi");
    }

    #[test]
    fn test_regrow_after_completion_snaps() {
        let mut state = RevealState::with_target("Hi");
        run_to_completion(&mut state);

        assert_eq!(state.set_target("Hi there"), TargetChange::Snapped);
        assert_eq!(state.shown_text(), "Hi there");
        assert!(!state.needs_tick());
        assert_eq!(state.tick(), RevealStep::Idle);
    }

    #[test]
    fn test_non_prefix_change_after_completion_snaps() {
        let mut state = RevealState::with_target("Hi");
        run_to_completion(&mut state);

        assert_eq!(state.set_target("Yo there"), TargetChange::Snapped);
        assert_eq!(state.shown_text(), "Yo there");
    }

    #[test]
    fn test_shrink_then_regrow_animates_again() {
        let mut state = RevealState::with_target("Hello");
        run_to_completion(&mut state);

        state.set_target("");
        assert_eq!(state.shown_text(), "");
        assert!(!state.needs_tick());

        assert_eq!(state.set_target("Again"), TargetChange::Retargeted);
        let (ticks, completions) = run_to_completion(&mut state);
        assert_eq!(ticks, 5);
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_growth_while_revealing_keeps_position() {
        let mut state = RevealState::with_target("Hello");
        state.tick();
        state.tick();
        assert_eq!(state.set_target("Hello world"), TargetChange::Retargeted);
        assert_eq!(state.shown_text(), "He");

        let (ticks, completions) = run_to_completion(&mut state);
        assert_eq!(ticks, 9);
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_mutation_during_animation_never_exceeds_target() {
        let mut state = RevealState::with_target("abcdef");
        for _ in 0..4 {
            state.tick();
        }
        // Shorter than shown: reset
        state.set_target("xyz");
        assert!(state.shown_len() <= 3);
        state.tick();
        state.set_target("xyzw");
        while state.needs_tick() {
            state.tick();
            assert!(state.shown_len() <= state.target().chars().count());
        }
        assert_eq!(state.shown_text(), "xyzw");
    }

    #[test]
    fn test_identical_target_is_noop() {
        let mut state = RevealState::with_target("same");
        state.tick();
        assert_eq!(state.set_target("same"), TargetChange::Unchanged);
        assert_eq!(state.shown_len(), 1);
    }

    #[test]
    fn test_multibyte_prefix() {
        let mut state = RevealState::with_target("héllo");
        state.tick();
        state.tick();
        assert_eq!(state.shown_text(), "hé");
    }
}

//! Icon selection for activity rows
//!
//! Icons come from an ordered rule table evaluated top to bottom; the first
//! matching rule wins. The "latest step of a live turn" rule sits first so it
//! overrides every keyword.

/// Icon category for an activity row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityIcon {
    /// Latest step of a turn that is still streaming
    InProgress,
    Query,
    Thinking,
    Reflection,
    Search,
    Writing,
    /// Fallback when no keyword matches
    Activity,
}

impl ActivityIcon {
    /// Terminal glyph for this icon
    pub fn glyph(&self) -> &'static str {
        match self {
            ActivityIcon::InProgress => "⟳",
            ActivityIcon::Query => "🔎",
            ActivityIcon::Thinking => "💭",
            ActivityIcon::Reflection => "🧠",
            ActivityIcon::Search => "🌐",
            ActivityIcon::Writing => "✎",
            ActivityIcon::Activity => "•",
        }
    }
}

/// What an icon rule inspects
#[derive(Debug, Clone, Copy)]
enum IconPredicate {
    /// The event is the newest one and its turn is live
    LatestWhileLive,
    /// Case-insensitive substring of the title
    TitleContains(&'static str),
}

impl IconPredicate {
    fn matches(&self, lowered_title: &str, latest_while_live: bool) -> bool {
        match self {
            IconPredicate::LatestWhileLive => latest_while_live,
            IconPredicate::TitleContains(keyword) => lowered_title.contains(keyword),
        }
    }
}

const ICON_RULES: &[(IconPredicate, ActivityIcon)] = &[
    (IconPredicate::LatestWhileLive, ActivityIcon::InProgress),
    (IconPredicate::TitleContains("generating"), ActivityIcon::Query),
    (IconPredicate::TitleContains("thinking"), ActivityIcon::Thinking),
    (IconPredicate::TitleContains("reflection"), ActivityIcon::Reflection),
    (IconPredicate::TitleContains("research"), ActivityIcon::Search),
    (IconPredicate::TitleContains("finalizing"), ActivityIcon::Writing),
];

/// Pick the icon for an event title.
///
/// `latest_while_live` must be true only for the last event of a turn that
/// is still in progress.
pub fn select_icon(title: &str, latest_while_live: bool) -> ActivityIcon {
    let lowered = title.to_lowercase();
    ICON_RULES
        .iter()
        .find(|(predicate, _)| predicate.matches(&lowered, latest_while_live))
        .map(|(_, icon)| *icon)
        .unwrap_or(ActivityIcon::Activity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert_eq!(select_icon("Reflection step", false), ActivityIcon::Reflection);
        assert_eq!(select_icon("REFLECTION STEP", false), ActivityIcon::Reflection);
        assert_eq!(select_icon("reflection step", false), ActivityIcon::Reflection);
    }

    #[test]
    fn test_live_latest_overrides_keywords() {
        assert_eq!(select_icon("Reflection step", true), ActivityIcon::InProgress);
        assert_eq!(select_icon("Web Research", true), ActivityIcon::InProgress);
    }

    #[test]
    fn test_first_matching_keyword_wins() {
        // Both "generating" and "research" occur; "generating" is listed first.
        assert_eq!(
            select_icon("Generating research queries", false),
            ActivityIcon::Query
        );
        assert_eq!(select_icon("Web Research", false), ActivityIcon::Search);
        assert_eq!(select_icon("Finalizing Answer", false), ActivityIcon::Writing);
        assert_eq!(select_icon("Thinking...", false), ActivityIcon::Thinking);
    }

    #[test]
    fn test_default_icon() {
        assert_eq!(select_icon("Something else", false), ActivityIcon::Activity);
        assert_eq!(select_icon("", false), ActivityIcon::Activity);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let first = select_icon("Generating Search Queries", false);
        for _ in 0..10 {
            assert_eq!(select_icon("Generating Search Queries", false), first);
        }
    }
}

//! Event filtering by tag substring and year range.

use crate::model::{Event, QuizConfig};

/// Outcome of filtering the event pool.
///
/// An empty match is a normal result, not an error: the caller decides how to
/// tell the player to loosen the filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    Matched(Vec<Event>),
    EmptyResult,
}

impl FilterOutcome {
    /// The matched events, or an empty vector.
    pub fn into_events(self) -> Vec<Event> {
        match self {
            FilterOutcome::Matched(events) => events,
            FilterOutcome::EmptyResult => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FilterOutcome::EmptyResult)
    }
}

/// Select the events that satisfy every active predicate in `config`.
///
/// - tag filter: lower-cased label or any lower-cased tag contains the
///   lower-cased filter text
/// - `min_year` / `max_year`: inclusive bounds
pub fn filter_events(pool: &[Event], config: &QuizConfig) -> FilterOutcome {
    let needle = config.normalized_tag_filter();

    let matched: Vec<Event> = pool
        .iter()
        .filter(|event| {
            needle
                .as_deref()
                .map_or(true, |needle| matches_text(event, needle))
        })
        .filter(|event| config.min_year.map_or(true, |min| event.year >= min))
        .filter(|event| config.max_year.map_or(true, |max| event.year <= max))
        .cloned()
        .collect();

    tracing::debug!(
        "filter kept {} of {} events (tag: {:?}, years: {:?}..={:?})",
        matched.len(),
        pool.len(),
        needle,
        config.min_year,
        config.max_year
    );

    if matched.is_empty() {
        FilterOutcome::EmptyResult
    } else {
        FilterOutcome::Matched(matched)
    }
}

/// Case-insensitive substring match against the label or any tag.
/// `needle` must already be lower-cased.
fn matches_text(event: &Event, needle: &str) -> bool {
    event.label.to_lowercase().contains(needle)
        || event
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

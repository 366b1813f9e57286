//! Core data model types for chronoquiz.
//!
//! Events are built once from the data source and never mutated afterwards;
//! a `QuizConfig` is built fresh from user input for every session.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Calendar era of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Era {
    Bc,
    #[default]
    Ad,
}

impl Era {
    /// The era a signed year belongs to. Zero counts as AD.
    pub fn of(year: i32) -> Self {
        if year < 0 {
            Era::Bc
        } else {
            Era::Ad
        }
    }

    /// Turn a positive year magnitude into a signed year.
    pub fn apply(self, magnitude: i32) -> i32 {
        match self {
            Era::Bc => -magnitude.saturating_abs(),
            Era::Ad => magnitude.saturating_abs(),
        }
    }

    /// The other era.
    pub fn toggled(self) -> Self {
        match self {
            Era::Bc => Era::Ad,
            Era::Ad => Era::Bc,
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Era::Bc => write!(f, "BC"),
            Era::Ad => write!(f, "AD"),
        }
    }
}

impl FromStr for Era {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bc" | "bce" => Ok(Era::Bc),
            "ad" | "ce" => Ok(Era::Ad),
            other => Err(format!("unknown era: {other}")),
        }
    }
}

/// Render a signed year as `"<magnitude> BC"` or `"<magnitude> AD"`.
pub fn format_year(year: i32) -> String {
    format!("{} {}", year.unsigned_abs(), Era::of(year))
}

/// A single historical event the player has to date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// What happened.
    pub label: String,
    /// Signed year; negative is BC.
    pub year: i32,
    /// Month 1-12, if known.
    #[serde(default)]
    pub month: Option<u8>,
    /// Day 1-31, if known. Only shown together with a month.
    #[serde(default)]
    pub day: Option<u8>,
    /// Normalized tags, in source order.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Event {
    pub fn new(label: impl Into<String>, year: i32) -> Self {
        Self {
            label: label.into(),
            year,
            month: None,
            day: None,
            tags: Vec::new(),
        }
    }

    pub fn with_date(mut self, month: u8, day: Option<u8>) -> Self {
        self.month = Some(month);
        self.day = day;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Day-and-month part of the date, e.g. `"15 March"` or `"March"`.
    ///
    /// Returns `None` when the month is missing or out of range; the day is
    /// ignored unless it is in range too.
    pub fn date_label(&self) -> Option<String> {
        let month = self.month.filter(|m| (1..=12).contains(m))?;
        let name = MONTH_NAMES[usize::from(month - 1)];
        match self.day.filter(|d| (1..=31).contains(d)) {
            Some(day) => Some(format!("{day} {name}")),
            None => Some(name.to_string()),
        }
    }

    /// Full display date, e.g. `"44 BC (15 March)"` or `"1969 AD"`.
    pub fn display_date(&self) -> String {
        match self.date_label() {
            Some(date) => format!("{} ({date})", format_year(self.year)),
            None => format_year(self.year),
        }
    }

    pub fn era(&self) -> Era {
        Era::of(self.year)
    }
}

/// The immutable collection of events obtained from a data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPool {
    events: Vec<Event>,
}

impl EventPool {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events carrying each tag, sorted by tag.
    pub fn tag_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for event in &self.events {
            for tag in &event.tags {
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Earliest and latest year in the pool.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let min = self.events.iter().map(|e| e.year).min()?;
        let max = self.events.iter().map(|e| e.year).max()?;
        Some((min, max))
    }
}

/// Parameters chosen by the player before a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Desired number of questions.
    pub length: usize,
    /// Case-insensitive substring matched against label and tags.
    #[serde(default)]
    pub tag_filter: Option<String>,
    /// Inclusive lower year bound.
    #[serde(default)]
    pub min_year: Option<i32>,
    /// Inclusive upper year bound.
    #[serde(default)]
    pub max_year: Option<i32>,
}

impl QuizConfig {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            tag_filter: None,
            min_year: None,
            max_year: None,
        }
    }

    pub fn with_tag_filter(mut self, filter: impl Into<String>) -> Self {
        self.tag_filter = Some(filter.into());
        self
    }

    pub fn with_year_range(mut self, min_year: Option<i32>, max_year: Option<i32>) -> Self {
        self.min_year = min_year;
        self.max_year = max_year;
        self
    }

    /// The tag filter, trimmed and lower-cased. Blank filters count as absent.
    pub fn normalized_tag_filter(&self) -> Option<String> {
        self.tag_filter
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Reject a zero length or an inverted year range.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.length == 0 {
            return Err(QuizError::InvalidConfig(
                "quiz length must be at least 1".into(),
            ));
        }
        if let (Some(min), Some(max)) = (self.min_year, self.max_year) {
            if min > max {
                return Err(QuizError::InvalidConfig(format!(
                    "minimum year {} is after maximum year {}",
                    format_year(min),
                    format_year(max)
                )));
            }
        }
        Ok(())
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::new(default_length())
    }
}

/// Default number of questions per session.
pub fn default_length() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_display_and_parse() {
        assert_eq!(Era::Bc.to_string(), "BC");
        assert_eq!(Era::Ad.to_string(), "AD");
        assert_eq!("bce".parse::<Era>().unwrap(), Era::Bc);
        assert_eq!("CE".parse::<Era>().unwrap(), Era::Ad);
        assert!("bp".parse::<Era>().is_err());
    }

    #[test]
    fn era_apply_and_toggle() {
        assert_eq!(Era::Bc.apply(44), -44);
        assert_eq!(Era::Ad.apply(44), 44);
        assert_eq!(Era::Ad.apply(-44), 44);
        assert_eq!(Era::Bc.toggled(), Era::Ad);
        assert_eq!(Era::of(-1), Era::Bc);
        assert_eq!(Era::of(1), Era::Ad);
    }

    #[test]
    fn era_apply_saturates_at_extremes() {
        assert_eq!(Era::Ad.apply(i32::MIN), i32::MAX);
        assert_eq!(Era::Bc.apply(i32::MIN), -i32::MAX);
    }

    #[test]
    fn format_years() {
        assert_eq!(format_year(-44), "44 BC");
        assert_eq!(format_year(1969), "1969 AD");
    }

    #[test]
    fn display_date_degrades_to_year() {
        let full = Event::new("Ides of March", -44).with_date(3, Some(15));
        assert_eq!(full.display_date(), "44 BC (15 March)");

        let month_only = Event::new("Moon landing", 1969).with_date(7, None);
        assert_eq!(month_only.display_date(), "1969 AD (July)");

        let bad_month = Event::new("Odd", 1500).with_date(13, Some(2));
        assert_eq!(bad_month.display_date(), "1500 AD");

        let mut day_only = Event::new("No month", 1200);
        day_only.day = Some(5);
        assert_eq!(day_only.display_date(), "1200 AD");
    }

    #[test]
    fn pool_tag_counts_and_span() {
        let pool = EventPool::new(vec![
            Event::new("a", 1900).with_tags(["war", "europe"]),
            Event::new("b", -300).with_tags(["war"]),
            Event::new("c", 2001),
        ]);
        let counts = pool.tag_counts();
        assert_eq!(counts.get("war"), Some(&2));
        assert_eq!(counts.get("europe"), Some(&1));
        assert_eq!(pool.year_span(), Some((-300, 2001)));
        assert_eq!(EventPool::default().year_span(), None);
    }

    #[test]
    fn config_validation() {
        assert!(QuizConfig::new(5).validate().is_ok());
        assert!(matches!(
            QuizConfig::new(0).validate(),
            Err(QuizError::InvalidConfig(_))
        ));
        let inverted = QuizConfig::new(5).with_year_range(Some(1900), Some(1800));
        assert!(matches!(
            inverted.validate(),
            Err(QuizError::InvalidConfig(_))
        ));
        let equal = QuizConfig::new(5).with_year_range(Some(1900), Some(1900));
        assert!(equal.validate().is_ok());
    }

    #[test]
    fn blank_tag_filter_is_absent() {
        assert_eq!(
            QuizConfig::new(1).with_tag_filter("   ").normalized_tag_filter(),
            None
        );
        assert_eq!(
            QuizConfig::new(1).with_tag_filter(" Rome ").normalized_tag_filter(),
            Some("rome".to_string())
        );
    }
}

//! Mock source for testing.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use chronoquiz_core::error::SourceError;
use chronoquiz_core::model::{Event, EventPool};
use chronoquiz_core::parser::{parse_payload, ParsedPool};
use chronoquiz_core::traits::EventSource;

/// An in-memory source that can be told to fail transiently a few times first.
pub struct MockSource {
    payload: Value,
    /// Number of leading calls that fail with a network error.
    failures: u32,
    call_count: AtomicU32,
}

impl MockSource {
    /// Serve a raw JSON payload, parsed exactly as a real source would.
    pub fn from_payload(payload: Value) -> Self {
        Self {
            payload,
            failures: 0,
            call_count: AtomicU32::new(0),
        }
    }

    /// Serve a list of already-built events.
    pub fn from_events(events: &[Event]) -> Self {
        let rows = events
            .iter()
            .map(|e| {
                serde_json::json!([
                    e.label,
                    e.year,
                    e.month,
                    e.day,
                    if e.tags.is_empty() {
                        Value::Null
                    } else {
                        Value::String(e.tags.join(", "))
                    }
                ])
            })
            .collect();
        Self::from_payload(Value::Array(rows))
    }

    /// Fail the first `failures` calls with a transient network error.
    pub fn failing_first(mut self, failures: u32) -> Self {
        self.failures = failures;
        self
    }

    /// Get the number of fetches made so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EventSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self) -> Result<ParsedPool, SourceError> {
        let call = self.call_count.fetch_add(1, Ordering::Relaxed);
        if call < self.failures {
            return Err(SourceError::Network(format!(
                "mock failure {} of {}",
                call + 1,
                self.failures
            )));
        }
        parse_payload(&self.payload)
    }
}

impl From<EventPool> for MockSource {
    fn from(pool: EventPool) -> Self {
        Self::from_events(pool.events())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_events() {
        let events = vec![
            Event::new("Magna Carta", 1215)
                .with_date(6, Some(15))
                .with_tags(["England", "law"]),
            Event::new("Battle of Marathon", -490),
        ];
        let source = MockSource::from_events(&events);
        let parsed = source.fetch().await.unwrap();
        assert_eq!(parsed.pool.events(), events.as_slice());
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn fails_first_calls() {
        let source = MockSource::from_events(&[Event::new("x", 1)]).failing_first(2);
        assert!(source.fetch().await.is_err());
        assert!(source.fetch().await.is_err());
        assert!(source.fetch().await.is_ok());
        assert_eq!(source.call_count(), 3);
    }
}

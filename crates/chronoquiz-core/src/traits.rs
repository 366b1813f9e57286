//! Core trait definitions for event data sources.
//!
//! Implemented by the `chronoquiz-sources` crate (HTTP, file, mock).

use async_trait::async_trait;

use crate::error::SourceError;
use crate::parser::ParsedPool;

/// Anything that can produce the full event list in one go.
///
/// A fetch either yields the complete pool or fails; there are no partial
/// results. Implementations must be idempotent so the loader can retry them.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Human-readable source name (e.g. "http").
    fn name(&self) -> &str;

    /// Fetch and parse the event list.
    async fn fetch(&self) -> Result<ParsedPool, SourceError>;
}

//! chronoquiz-sources — Event data sources.
//!
//! Implements the `EventSource` trait for an HTTP endpoint and a local JSON
//! file, plus the configuration file that selects between them.

pub mod config;
pub mod file;
pub mod http;
pub mod mock;

pub use config::{create_source, load_config, ChronoquizConfig, SourceConfig};
pub use file::FileSource;
pub use http::HttpSource;
pub use mock::MockSource;

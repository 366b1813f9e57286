//! Local JSON file event source, for offline play.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::instrument;

use chronoquiz_core::error::SourceError;
use chronoquiz_core::parser::{parse_payload_str, ParsedPool};
use chronoquiz_core::traits::EventSource;

/// Reads the same positional JSON rows an HTTP source would serve.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EventSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<ParsedPool, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        parse_payload_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_events_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"[["Printing press", 1440, null, null, "technology"], ["Bad", "x"]]"#,
        )
        .unwrap();

        let parsed = FileSource::new(&path).fetch().await.unwrap();
        assert_eq!(parsed.pool.len(), 1);
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_permanent_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileSource::new(dir.path().join("nope.json"))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
        assert!(err.is_permanent());
    }
}

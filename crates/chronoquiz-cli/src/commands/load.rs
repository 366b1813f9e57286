//! Shared event loading for the commands that need data.

use anyhow::Result;

use chronoquiz_core::error::QuizError;
use chronoquiz_core::loader::load_pool;
use chronoquiz_core::parser::ParsedPool;
use chronoquiz_sources::config::load_config_from;
use chronoquiz_sources::{create_source, ChronoquizConfig, SourceConfig};

use crate::SourceArgs;

/// Pick the source: `--file` or `--url` win over the config file.
pub fn resolve_source(args: &SourceArgs, config: &ChronoquizConfig) -> Result<SourceConfig> {
    if let Some(path) = &args.file {
        return Ok(SourceConfig::File { path: path.clone() });
    }
    if let Some(url) = &args.url {
        return Ok(SourceConfig::Http {
            url: url.clone(),
            timeout_secs: None,
        });
    }
    config.source(args.source.as_deref()).cloned()
}

/// Load config, then fetch the event pool with retries.
///
/// Ctrl-C while waiting abandons the fetch.
pub async fn load_events(args: &SourceArgs) -> Result<(ChronoquizConfig, ParsedPool)> {
    let config = load_config_from(args.config.as_deref())?;
    let source_config = resolve_source(args, &config)?;
    let source = create_source(&source_config);
    let policy = config.retry_policy();

    eprintln!("Loading events from {}...", source.name());

    let result = tokio::select! {
        result = load_pool(source.as_ref(), &policy) => result,
        _ = tokio::signal::ctrl_c() => anyhow::bail!("cancelled while loading events"),
    };

    match result {
        Ok(parsed) => Ok((config, parsed)),
        Err(e @ QuizError::DataFetchFailure { .. }) => Err(anyhow::Error::new(e).context(
            "Data load error. Check the source URL or file and that the data is published.",
        )),
        Err(QuizError::InsufficientData) => anyhow::bail!(
            "Data loaded successfully, but the event list is empty. \
             Check the data range in your source."
        ),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn file_flag_overrides_config() {
        let args = SourceArgs {
            file: Some(PathBuf::from("mine.json")),
            ..Default::default()
        };
        let source = resolve_source(&args, &ChronoquizConfig::default()).unwrap();
        assert_eq!(
            source,
            SourceConfig::File {
                path: PathBuf::from("mine.json")
            }
        );
    }

    #[test]
    fn url_flag_builds_http_source() {
        let args = SourceArgs {
            url: Some("https://example.com/exec".into()),
            ..Default::default()
        };
        let source = resolve_source(&args, &ChronoquizConfig::default()).unwrap();
        assert!(matches!(source, SourceConfig::Http { ref url, .. } if url == "https://example.com/exec"));
    }

    #[test]
    fn missing_named_source_errors() {
        let args = SourceArgs {
            source: Some("nowhere".into()),
            ..Default::default()
        };
        assert!(resolve_source(&args, &ChronoquizConfig::default()).is_err());
    }
}

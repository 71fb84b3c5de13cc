//! Logging for gh-wrapped
//!
//! Pipeline runs log to a daily-rotated file under the state directory
//! (`~/.local/state/gh-wrapped/gh-wrapped.log.YYYY-MM-DD`), or under
//! `[logging] directory` when set. `[logging] stderr = true` mirrors the
//! same events to the terminal in compact form.
//!
//! The `[logging] level` key accepts a bare level. `RUST_LOG` directives are
//! layered on top of it.

use std::path::Path;

use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Prefix of the rotated log files; rotation appends the date.
pub const LOG_FILE_PREFIX: &str = "gh-wrapped.log";

/// Install the global subscriber.
///
/// Fails with [`Error::Config`] on an unknown level or when the log
/// directory cannot be used.
pub fn init(config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_level(&config.level)?;
    let log_dir = config.log_dir();
    let appender = build_appender(&log_dir, config.max_files)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // Span close events carry the per-run trace id and elapsed time
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    let stderr_layer = config.stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("logging already initialized: {}", e)))?;

    tracing::info!(
        log_dir = %log_dir.display(),
        level = %level,
        stderr = config.stderr,
        "Logging initialized"
    );

    Ok(LoggingGuard { _guard: guard })
}

/// Parse the configured level name (case-insensitive).
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| Error::Config(format!("unknown log level: {:?}", level)))
}

/// Daily-rotated appender in `dir`, keeping at most `max_files` files.
pub fn build_appender(dir: &Path, max_files: usize) -> Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .max_log_files(max_files.max(1))
        .build(dir)
        .map_err(|e| Error::Config(format!("failed to create log appender: {}", e)))
}

/// Initialize logging for tests (captured test output)
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .with_span_events(FmtSpan::CLOSE)
        .try_init();
}

/// Keeps the background writer alive; pending lines are flushed on drop.
pub struct LoggingGuard {
    _guard: WorkerGuard,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::OFF);
        assert!(matches!(parse_level("loud"), Err(Error::Config(_))));
    }

    #[test]
    fn test_build_appender_writes_prefixed_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");

        let mut appender = build_appender(&log_dir, 0).unwrap();
        writeln!(appender, "pipeline finished").unwrap();
        appender.flush().unwrap();

        let names: Vec<String> = std::fs::read_dir(&log_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with(LOG_FILE_PREFIX));

        let content = std::fs::read_to_string(log_dir.join(&names[0])).unwrap();
        assert_eq!(content, "pipeline finished\n");
    }

    #[test]
    fn test_build_appender_rejects_file_as_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();

        assert!(build_appender(&blocker, 3).is_err());
    }
}

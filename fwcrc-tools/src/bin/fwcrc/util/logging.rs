use std::{fs::File, path::Path};

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Module path prefix shared by the library and the binary.
const TARGET: &str = "fwcrc";

/// Verbosity of the `fwcrc` diagnostics.
///
/// Only messages from this tool are affected, dependencies stay at `warn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    /// Also print every computed checksum.
    Info,
    /// Also print the paths being opened and the reference values compared.
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// `EnvFilter` directives setting `fwcrc` targets to `level` and everything else to `warn`.
fn directive(level: LogLevel) -> String {
    format!("{},{TARGET}={}", LevelFilter::WARN, LevelFilter::from(level))
}

/// Filter for the stderr layer.
///
/// An explicit level wins over `RUST_LOG`, which only applies when no level
/// was given on the command line or in the configuration.
fn stderr_filter(level: Option<LogLevel>) -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into());

    match level {
        Some(level) => builder.parse_lossy(directive(level)),
        None => builder.from_env_lossy(),
    }
}

/// Installs the global subscriber.
///
/// Diagnostics go to stderr, filtered by `level`. With a `log_path`, every
/// `fwcrc` event down to `debug` is also written to that file as JSON lines;
/// the returned guard flushes it when dropped.
pub fn setup_logging(
    log_path: Option<&Path>,
    level: Option<LogLevel>,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter(level));

    let Some(log_path) = log_path else {
        tracing_subscriber::registry().with(stderr_layer).init();
        return Ok(None);
    };

    let log_file = File::create(log_path)?;
    let (file_writer, guard) = tracing_appender::non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(log_file);

    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(file_writer)
        .with_filter(EnvFilter::new(directive(LogLevel::Debug)));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::debug!("Logging to {:?}", log_path);

    Ok(Some(guard))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case(LogLevel::Error, "warn,fwcrc=error")]
    #[test_case(LogLevel::Info, "warn,fwcrc=info")]
    #[test_case(LogLevel::Trace, "warn,fwcrc=trace")]
    fn directives_are_scoped_to_fwcrc(level: LogLevel, expected: &str) {
        assert_eq!(directive(level), expected);
    }

    #[test]
    fn explicit_level_sets_the_fwcrc_target() {
        let filter = stderr_filter(Some(LogLevel::Debug)).to_string();

        assert!(filter.contains("fwcrc=debug"), "{filter}");
        assert!(filter.contains("warn"), "{filter}");
    }

    #[test]
    fn levels_are_lowercase_in_config_files() {
        let level: LogLevel = serde_json::from_str(r#""info""#).unwrap();
        assert_eq!(level, LogLevel::Info);

        serde_json::from_str::<LogLevel>(r#""INFO""#).unwrap_err();
        serde_json::from_str::<LogLevel>(r#""off""#).unwrap_err();
    }
}

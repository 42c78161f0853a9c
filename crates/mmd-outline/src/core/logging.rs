//! Logging setup for outline derivation
//!
//! Everything logs through `tracing`. [`init_logging`] resolves a
//! [`LogConfig`] from explicit arguments and the environment, then installs
//! one fmt layer on stderr behind an `EnvFilter`, so stdout stays reserved
//! for outline text.
//!
//! ```rust
//! use mmd_outline::core::logging::init_logging;
//!
//! let _ = init_logging(Some("mmd_outline::session=debug"), Some("compact"));
//! ```
//!
//! Environment fallbacks, in order:
//!
//! - level: `MMD_OUTLINE_LOG_LEVEL`, then `RUST_LOG`, then `info`
//! - format: `MMD_OUTLINE_LOG_FORMAT`, then `compact`

use std::str::FromStr;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Environment variable overriding the log level
pub const LOG_LEVEL_ENV: &str = "MMD_OUTLINE_LOG_LEVEL";

/// Environment variable overriding the log format
pub const LOG_FORMAT_ENV: &str = "MMD_OUTLINE_LOG_FORMAT";

const DEFAULT_DIRECTIVE: &str = "info";

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event, no targets
    #[default]
    Compact,
    /// Multi-line with source locations and span activity
    Pretty,
    /// Newline-delimited JSON with span close timings
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .iter()
            .position(|name| name.eq_ignore_ascii_case(s))
            .map(|index| [LogFormat::Compact, LogFormat::Pretty, LogFormat::Json][index])
            .ok_or_else(|| format!("Unknown log format: {}", s))
    }
}

impl LogFormat {
    /// Accepted format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Resolved logging settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `warn` or `mmd_outline::session=debug`
    pub directive: String,
    pub format: LogFormat,
}

impl LogConfig {
    /// Resolve settings, explicit arguments first, then the environment
    pub fn resolve(level: Option<&str>, format: Option<&str>) -> Result<Self, String> {
        let directive = level
            .map(str::to_string)
            .or_else(|| std::env::var(LOG_LEVEL_ENV).ok())
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string());

        let format = match format
            .map(str::to_string)
            .or_else(|| std::env::var(LOG_FORMAT_ENV).ok())
        {
            Some(raw) => raw.parse::<LogFormat>()?,
            None => LogFormat::default(),
        };

        Ok(Self { directive, format })
    }

    /// Filter for the directive; an unparsable directive falls back to `info`
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
    }

    fn layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        match self.format {
            LogFormat::Compact => fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact()
                .boxed(),
            LogFormat::Pretty => fmt::layer()
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_span_events(FmtSpan::ACTIVE)
                .pretty()
                .boxed(),
            LogFormat::Json => fmt::layer()
                .with_writer(std::io::stderr)
                .with_span_events(FmtSpan::CLOSE)
                .json()
                .boxed(),
        }
    }

    /// Install as the global subscriber
    ///
    /// Fails when a global subscriber is already set.
    pub fn install(&self) -> Result<(), Box<dyn std::error::Error>> {
        tracing_subscriber::registry()
            .with(self.layer())
            .with(self.filter())
            .try_init()?;
        Ok(())
    }
}

/// Resolve settings and install the global subscriber
///
/// Returns an error for an unknown format or when logging is already
/// initialized.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        LogConfig::resolve(level, format).map_err(|e| format!("Invalid log format: {}", e))?;
    config.install()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::from_str("Pretty").unwrap(), LogFormat::Pretty);
        assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_explicit_arguments_win() {
        let config = LogConfig::resolve(Some("debug"), Some("json")).unwrap();
        assert_eq!(config.directive, "debug");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(LogConfig::resolve(Some("info"), Some("yaml")).is_err());
    }
}

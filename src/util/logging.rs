//! Structured logging setup for creditlens
//!
//! Logs go to stderr so that report paths and rendered reports printed on
//! stdout stay machine-readable. `RUST_LOG` takes precedence over the
//! configured level when set.
//!
//! # Example
//!
//! ```no_run
//! use creditlens::util::logging;
//!
//! // With environment: CREDITLENS_LOG_LEVEL=debug CREDITLENS_LOG_JSON=true
//! logging::init_from_env();
//!
//! tracing::info!(stage = "risk", "Stage started");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Dependencies whose chatter is capped at `warn` unless `RUST_LOG` says otherwise
const QUIET_DEPENDENCIES: &[&str] = &["h2", "hyper", "reqwest", "genai"];

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for creditlens' own events
    pub level: Level,

    /// Emit one JSON object per event instead of console lines
    pub use_json: bool,

    /// Include the module target (e.g., creditlens::pipeline) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,

    /// Include thread ID and name in logs
    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Resolves the level from command-line flags
    ///
    /// An explicit `--log-level` wins, then `-v` (debug), then `-q` (error),
    /// then `CREDITLENS_LOG_LEVEL`.
    pub fn from_cli_flags(log_level: Option<&str>, verbose: bool, quiet: bool) -> Self {
        let level = match log_level {
            Some(level_str) => parse_level(level_str),
            None if verbose => Level::DEBUG,
            None if quiet => Level::ERROR,
            None => parse_level(&env_level()),
        };

        Self {
            level,
            use_json: env_json(),
            ..Default::default()
        }
    }

    fn filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::from_default_env();

        if env::var("RUST_LOG").is_err() {
            let mut directives = vec![format!("creditlens={}", self.level)];
            directives.extend(QUIET_DEPENDENCIES.iter().map(|dep| format!("{}=warn", dep)));

            for directive in directives {
                if let Ok(parsed) = directive.parse::<Directive>() {
                    filter = filter.add_directive(parsed);
                }
            }
        }

        filter
    }
}

/// Parses a log level from a string, case-insensitively
///
/// Unknown names fall back to `INFO` with a notice on stderr.
///
/// ```
/// use creditlens::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("Debug"), Level::DEBUG);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

fn env_level() -> String {
    env::var("CREDITLENS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
}

fn env_json() -> bool {
    env::var("CREDITLENS_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false)
}

/// Installs the global subscriber; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.filter();

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .init();
        }
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Initializes logging from `CREDITLENS_LOG_LEVEL` and `CREDITLENS_LOG_JSON`
pub fn init_from_env() {
    init_logging(LoggingConfig {
        level: parse_level(&env_level()),
        use_json: env_json(),
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_case_insensitive() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("Debug"), Level::DEBUG);
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("invalid"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);
        assert!(!config.include_location);
    }

    #[test]
    #[serial]
    fn test_cli_flags_precedence() {
        assert_eq!(
            LoggingConfig::from_cli_flags(Some("warn"), true, false).level,
            Level::WARN
        );
        assert_eq!(
            LoggingConfig::from_cli_flags(None, true, false).level,
            Level::DEBUG
        );
        assert_eq!(
            LoggingConfig::from_cli_flags(None, false, true).level,
            Level::ERROR
        );
    }

    #[test]
    #[serial]
    fn test_cli_flags_fall_back_to_env() {
        let old = env::var("CREDITLENS_LOG_LEVEL").ok();
        env::set_var("CREDITLENS_LOG_LEVEL", "trace");

        let level = LoggingConfig::from_cli_flags(None, false, false).level;

        match old {
            Some(v) => env::set_var("CREDITLENS_LOG_LEVEL", v),
            None => env::remove_var("CREDITLENS_LOG_LEVEL"),
        }
        assert_eq!(level, Level::TRACE);
    }
}

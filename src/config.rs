//! # Logger Configuration
//!
//! [`Config`] describes which handler to build and how it filters records.
//! It derives `serde` traits with per-field defaults, so it can be loaded
//! from any serde source; [`new_logger`] turns it into a [`Logger`].
//!
//! ## Handler Selection
//!
//! | format    | colors | handler                        |
//! |-----------|--------|--------------------------------|
//! | `console` | on     | [`ColoredHandler`], text mode  |
//! | `json`    | on     | [`ColoredHandler`], JSON mode  |
//! | `console` | off    | [`TextHandler`]                |
//! | `json`    | off    | [`JsonHandler`]                |
//!
//! Colors are on when `enable_colors` is set or when the environment is a
//! local one (`development`, `local`, `dev`, in any case).

use crate::error::Result;
use crate::handler::{ColoredHandler, Handler, HandlerOptions, JsonHandler, TextHandler};
use crate::level::Level;
use crate::logger::Logger;
use crate::writer::LogWriter;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Base rendering family
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Format {
    Json,
    Console,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Console => "console",
        }
    }
}

/// `"console"` selects console output; every other name falls back to JSON.
impl From<&str> for Format {
    fn from(s: &str) -> Self {
        if s == "console" {
            Format::Console
        } else {
            Format::Json
        }
    }
}

impl From<String> for Format {
    fn from(s: String) -> Self {
        Format::from(s.as_str())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logger settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum enabled level name: `debug`, `info`, `warn` or `error`
    pub level: String,
    pub format: Format,
    /// Capture and render the file:line of each log call
    pub enable_caller: bool,
    /// Reserved; carried through configuration but never rendered
    pub enable_stacktrace: bool,
    /// Force colored output regardless of environment
    pub enable_colors: bool,
    /// Deployment environment name (development, staging, production, ...)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: crate::defaults::LEVEL.to_string(),
            format: crate::defaults::FORMAT,
            enable_caller: true,
            enable_stacktrace: true,
            enable_colors: false,
            environment: crate::defaults::ENVIRONMENT.to_string(),
        }
    }
}

impl Config {
    /// Settings derived from the environment name alone.
    ///
    /// Local environments get colored console output, everything else plain
    /// JSON. The level is always `info` with caller and stacktrace capture on.
    pub fn for_environment(environment: &str) -> Self {
        let local = is_local_environment(environment);
        Self {
            level: "info".to_string(),
            format: if local { Format::Console } else { Format::Json },
            enable_caller: true,
            enable_stacktrace: true,
            enable_colors: local,
            environment: environment.to_string(),
        }
    }

    /// Whether the selected handler renders ANSI colors
    pub fn use_colors(&self) -> bool {
        self.enable_colors || is_local_environment(&self.environment)
    }
}

/// Case-insensitive check for `development`, `local` or `dev`
pub fn is_local_environment(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    matches!(environment.as_str(), "development" | "local" | "dev")
}

/// Build a logger writing to stdout
pub fn new_logger(config: &Config) -> Result<Logger> {
    new_logger_with_writer(config, LogWriter::stdout())
}

/// Build a logger writing to `writer`.
///
/// Fails when the level name is not recognized; no logger is produced in
/// that case.
pub fn new_logger_with_writer(config: &Config, writer: LogWriter) -> Result<Logger> {
    // Reject unknown level names before building anything.
    let level: Level = config.level.parse()?;
    let opts = HandlerOptions {
        level: Some(level),
        add_source: config.enable_caller,
    };

    // Pick the handler from the format and whether colors apply.
    let handler: Arc<dyn Handler> = match (config.format, config.use_colors()) {
        (Format::Console, true) => Arc::new(ColoredHandler::new(writer, opts, false)),
        (Format::Json, true) => Arc::new(ColoredHandler::new(writer, opts, true)),
        (Format::Console, false) => Arc::new(TextHandler::new(writer, opts)),
        (Format::Json, false) => Arc::new(JsonHandler::new(writer, opts)),
    };

    Ok(Logger::new(handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ParseLevelError};
    use crate::writer::MemoryWriter;

    fn config(format: Format, enable_colors: bool, environment: &str) -> Config {
        Config {
            level: "debug".to_string(),
            format,
            enable_colors,
            environment: environment.to_string(),
            ..Default::default()
        }
    }

    fn render(config: &Config) -> String {
        let memory = MemoryWriter::new();
        let logger = new_logger_with_writer(config, memory.log_writer()).unwrap();
        logger.info("configured", &[crate::Attr::new("key", "value")]);
        memory.contents()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, Format::Json);
        assert!(config.enable_caller);
        assert!(config.enable_stacktrace);
        assert!(!config.enable_colors);
        assert_eq!(config.environment, "production");
        assert!(!config.use_colors());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"level": "warn", "format": "console"}"#).unwrap();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, Format::Console);
        assert_eq!(config.environment, "production");

        // Unknown format names fall back to JSON
        let config: Config = serde_json::from_str(r#"{"format": "text"}"#).unwrap();
        assert_eq!(config.format, Format::Json);

        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains(r#""format":"json""#));
    }

    #[test]
    fn test_is_local_environment() {
        assert!(is_local_environment("development"));
        assert!(is_local_environment("local"));
        assert!(is_local_environment("dev"));
        assert!(is_local_environment("DEV"));
        assert!(is_local_environment("Development"));
        assert!(!is_local_environment("production"));
        assert!(!is_local_environment("staging"));
        assert!(!is_local_environment(""));
    }

    #[test]
    fn test_invalid_level_fails() {
        let config = Config {
            level: "invalid".to_string(),
            ..Default::default()
        };
        let err = new_logger_with_writer(&config, MemoryWriter::new().log_writer()).unwrap_err();
        match err {
            Error::InvalidLevel(ParseLevelError(name)) => assert_eq!(name, "invalid"),
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(
            new_logger(&config).unwrap_err().to_string(),
            "invalid log level: unknown log level: invalid"
        );
    }

    #[test]
    fn test_handler_selection() {
        // console + colors: colored text
        let output = render(&config(Format::Console, true, "production"));
        assert!(output.contains("\x1b[32mINFO \x1b[0m configured"));
        assert!(output.contains("Attributes:"));

        // json + colors: colored JSON
        let output = render(&config(Format::Json, true, "production"));
        assert!(output.starts_with("\x1b[32m{"));
        assert!(output.contains(r#""msg": "configured""#));

        // console without colors: plain text
        let output = render(&config(Format::Console, false, "production"));
        assert!(output.contains(" level=INFO "));
        assert!(output.contains(" msg=configured key=value"));
        assert!(!output.contains('\x1b'));

        // json without colors: plain JSON
        let output = render(&config(Format::Json, false, "production"));
        assert!(output.contains(r#""msg":"configured""#));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_local_environment_enables_colors() {
        let output = render(&config(Format::Console, false, "Local"));
        assert!(output.contains("\x1b[32m"));

        let output = render(&config(Format::Json, false, "dev"));
        assert!(output.starts_with("\x1b[32m{"));
    }

    #[test]
    fn test_level_threshold_applies() {
        let config = Config {
            level: "warn".to_string(),
            ..Default::default()
        };
        let logger = new_logger_with_writer(&config, MemoryWriter::new().log_writer()).unwrap();
        assert!(!logger.enabled(crate::Level::Debug));
        assert!(!logger.enabled(crate::Level::Info));
        assert!(logger.enabled(crate::Level::Warn));
        assert!(logger.enabled(crate::Level::Error));
    }

    #[test]
    fn test_for_environment() {
        let config = Config::for_environment("development");
        assert_eq!(config.format, Format::Console);
        assert!(config.enable_colors);
        assert_eq!(config.level, "info");

        let config = Config::for_environment("production");
        assert_eq!(config.format, Format::Json);
        assert!(!config.enable_colors);
        assert!(config.enable_caller);
        assert!(config.enable_stacktrace);
    }
}

//! # Structured Logger
//!
//! Leveled, structured logging with pluggable handlers.
//! This library wraps a small record/handler core with colored console output,
//! configuration-driven construction, a process-wide default logger and an
//! adapter for older untyped logging call sites.
//!
//! ## Handlers
//!
//! Every logger writes through a [`Handler`]:
//!
//! - **[`ColoredHandler`]**: human-readable colored text, or pretty JSON wrapped in the level color
//! - **[`TextHandler`]**: plain `key=value` lines
//! - **[`JsonHandler`]**: compact one-object-per-line JSON
//! - **[`MockHandler`]**: in-memory capture for tests
//!
//! ## Architecture Overview
//!
//! - `level`, `attr`, `record`: the data model passed from loggers to handlers
//! - `handler`: the `Handler` trait and its implementations
//! - `logger`: the `Logger` front-end that builds records and captures call sites
//! - `config`: `Config` and the constructor that selects a handler
//! - `global`: the process-wide default logger and free logging functions
//! - `legacy`: the `(msg, key, value, ...)` compatibility adapter
//! - `bridge`: a `tracing` layer forwarding events into a logger
//!
//! ## Usage Example
//!
//! ```rust
//! use structured_logger::{new_logger_with_writer, Attr, Config, Format, MemoryWriter};
//!
//! # fn main() -> structured_logger::Result<()> {
//! let config = Config {
//!     level: "debug".to_string(),
//!     format: Format::Console,
//!     enable_colors: true,
//!     ..Default::default()
//! };
//!
//! let output = MemoryWriter::new();
//! let logger = new_logger_with_writer(&config, output.log_writer())?;
//!
//! let user_logger = logger.with("user_id", "123");
//! user_logger.info("User logged in", &[Attr::new("ip", "192.168.1.1")]);
//!
//! assert!(output.contents().contains("User logged in"));
//! # Ok(())
//! # }
//! ```

pub mod attr;

/// Handler abstraction and built-in handlers
///
/// The `Handler` trait is the seam between loggers and output. Handlers are
/// immutable: `with_attrs` and `with_group` return new handlers sharing only
/// the writer with their parent.
pub mod handler;

pub mod bridge;
pub mod cli;
pub mod config;
pub mod error;
pub mod global;
pub mod legacy;
pub mod level;
pub mod logger;
pub mod record;
pub mod writer;

pub use attr::{args_to_attrs, Attr, Value};
pub use bridge::{init_tracing_bridge, TracingBridge};
pub use config::{is_local_environment, new_logger, new_logger_with_writer, Config, Format};
pub use error::{Error, ParseLevelError, Result};
pub use global::{
    debug, default_logger, error, info, init, init_from_env, init_with_writer, set_default, warn,
    with,
};
pub use handler::{
    ColoredHandler, Handler, HandlerOptions, JsonHandler, LogEntry, MockHandler, TextHandler,
};
pub use legacy::{extract_message_and_args, LegacyAdapter, LegacyLogger};
pub use level::Level;
pub use logger::Logger;
pub use record::{Record, Source};
pub use writer::{LogWriter, MemoryWriter};

/// The current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
pub mod defaults {
    use crate::config::Format;

    /// Default minimum level name
    pub const LEVEL: &str = "info";

    /// Default output format
    ///
    /// JSON is the safe choice for anything that ships logs to a collector;
    /// local environments switch to colored console output on their own.
    pub const FORMAT: Format = Format::Json;

    /// Default environment name
    pub const ENVIRONMENT: &str = "production";
}

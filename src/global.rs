//! Process-wide default logger
//!
//! Code that can take a [`Logger`] explicitly should do so. The global slot
//! exists for call sites that cannot: it is set with [`set_default`] (or
//! [`init`]) and read by the free functions in this module.

use crate::attr::{Attr, Value};
use crate::config::{new_logger_with_writer, Config};
use crate::error::{Error, Result};
use crate::handler::{HandlerOptions, TextHandler};
use crate::level::Level;
use crate::logger::Logger;
use crate::writer::LogWriter;
use parking_lot::{const_rwlock, RwLock};
use std::sync::{Arc, OnceLock};

static DEFAULT_LOGGER: RwLock<Option<Logger>> = const_rwlock(None);

/// Built-in logger used until a default is installed: plain text on stderr
/// at `info`.
fn fallback() -> &'static Logger {
    static FALLBACK: OnceLock<Logger> = OnceLock::new();
    FALLBACK.get_or_init(|| {
        Logger::new(Arc::new(TextHandler::new(
            LogWriter::stderr(),
            HandlerOptions::new(Level::Info),
        )))
    })
}

/// Replace the default logger
pub fn set_default(logger: Logger) {
    *DEFAULT_LOGGER.write() = Some(logger);
}

/// The installed default logger, or the built-in one if none was set
pub fn default_logger() -> Logger {
    DEFAULT_LOGGER
        .read()
        .as_ref()
        .unwrap_or_else(|| fallback())
        .clone()
}

#[track_caller]
pub fn debug(msg: &str, attrs: &[Attr]) {
    default_logger().log(Level::Debug, msg, attrs);
}

#[track_caller]
pub fn info(msg: &str, attrs: &[Attr]) {
    default_logger().log(Level::Info, msg, attrs);
}

#[track_caller]
pub fn warn(msg: &str, attrs: &[Attr]) {
    default_logger().log(Level::Warn, msg, attrs);
}

#[track_caller]
pub fn error(msg: &str, attrs: &[Attr]) {
    default_logger().log(Level::Error, msg, attrs);
}

/// The default logger with `key=value` added to every record
pub fn with(key: &str, value: impl Into<Value>) -> Logger {
    default_logger().with(key, value)
}

/// Build a logger from `config`, install it as the default and log the
/// effective settings through it.
pub fn init(config: &Config) -> Result<()> {
    init_with_writer(config, LogWriter::stdout())
}

/// [`init`] with output going to `writer` instead of stdout
pub fn init_with_writer(config: &Config, writer: LogWriter) -> Result<()> {
    let logger =
        new_logger_with_writer(config, writer).map_err(|err| Error::Init(Box::new(err)))?;
    set_default(logger.clone());

    logger.info(
        "Logger initialized",
        &[
            Attr::new("level", config.level.as_str()),
            Attr::new("format", config.format.as_str()),
            Attr::new("enableCaller", config.enable_caller),
            Attr::new("enableStacktrace", config.enable_stacktrace),
            Attr::new("environment", config.environment.as_str()),
            Attr::new("enableColors", config.enable_colors),
        ],
    );

    Ok(())
}

/// [`init`] with settings derived from the environment name
pub fn init_from_env(environment: &str) -> Result<()> {
    init(&Config::for_environment(environment))
}

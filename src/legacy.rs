//! Adapter for the older `(msg, key, value, ...)` calling convention
//!
//! Older call sites pass a single untyped argument list whose first element
//! is the message. [`LegacyAdapter`] splits that list and forwards a typed
//! structured call to a [`Logger`].

use crate::attr::{args_to_attrs, Value};
use crate::level::Level;
use crate::logger::Logger;
use crate::record::{Record, Source};

/// The untyped logging interface kept for backward compatibility
///
/// The leveled methods capture the caller's location even when called
/// through `dyn LegacyLogger`.
pub trait LegacyLogger: Send + Sync {
    #[track_caller]
    fn debug(&self, args: Vec<Value>);
    #[track_caller]
    fn info(&self, args: Vec<Value>);
    #[track_caller]
    fn warn(&self, args: Vec<Value>);
    #[track_caller]
    fn error(&self, args: Vec<Value>);
    /// A logger that adds `key=value` to every record
    fn with(&self, key: &str, value: Value) -> Box<dyn LegacyLogger>;
}

/// Implements [`LegacyLogger`] on top of a structured [`Logger`]
#[derive(Clone, Debug)]
pub struct LegacyAdapter {
    logger: Logger,
}

impl LegacyAdapter {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    #[track_caller]
    fn log(&self, level: Level, args: Vec<Value>) {
        if args.is_empty() || !self.logger.enabled(level) {
            return;
        }
        let source = Source::caller();
        let (msg, rest) = extract_message_and_args(args);
        let attrs = args_to_attrs(rest.unwrap_or_default());
        self.logger
            .log_record(Record::new(level, msg).with_source(source).with_attrs(attrs));
    }
}

impl LegacyLogger for LegacyAdapter {
    #[track_caller]
    fn debug(&self, args: Vec<Value>) {
        self.log(Level::Debug, args);
    }

    #[track_caller]
    fn info(&self, args: Vec<Value>) {
        self.log(Level::Info, args);
    }

    #[track_caller]
    fn warn(&self, args: Vec<Value>) {
        self.log(Level::Warn, args);
    }

    #[track_caller]
    fn error(&self, args: Vec<Value>) {
        self.log(Level::Error, args);
    }

    fn with(&self, key: &str, value: Value) -> Box<dyn LegacyLogger> {
        Box::new(LegacyAdapter::new(self.logger.with(key, value)))
    }
}

/// Split a legacy argument list into its message and the remaining arguments.
///
/// An empty list yields `("", None)`. Otherwise the first element is the
/// message (non-strings use their display form) and the rest is returned
/// as-is, in order, as `Some` (possibly empty).
pub fn extract_message_and_args(args: Vec<Value>) -> (String, Option<Vec<Value>>) {
    let mut iter = args.into_iter();
    let msg = match iter.next() {
        None => return (String::new(), None),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    };
    (msg, Some(iter.collect()))
}

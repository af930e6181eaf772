//! Logger front-end over a [`Handler`]

use crate::attr::{args_to_attrs, Attr, Value};
use crate::handler::Handler;
use crate::level::Level;
use crate::record::{Record, Source};
use std::fmt;
use std::sync::Arc;

/// A cheap, cloneable handle that turns log calls into [`Record`]s
///
/// The logger checks [`Handler::enabled`] before building a record, captures
/// the caller's file and line, and hands the record to its handler. Handler
/// errors are dropped here: a failing sink never disturbs the code that logs.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
}

impl Logger {
    pub fn new(handler: Arc<dyn Handler>) -> Self {
        Self { handler }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// Log `msg` at `level` with call-site attributes
    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, attrs: &[Attr]) {
        if !self.enabled(level) {
            return;
        }
        self.emit(level, msg, attrs.to_vec(), Source::caller());
    }

    /// Log with a flat `key, value, ...` argument list
    #[track_caller]
    pub fn log_args(&self, level: Level, msg: &str, args: Vec<Value>) {
        if !self.enabled(level) {
            return;
        }
        self.emit(level, msg, args_to_attrs(args), Source::caller());
    }

    /// Log an already built record, keeping its time and source
    pub fn log_record(&self, record: Record) {
        if self.enabled(record.level) {
            let _ = self.handler.handle(&record);
        }
    }

    #[track_caller]
    pub fn debug(&self, msg: &str, attrs: &[Attr]) {
        self.log(Level::Debug, msg, attrs);
    }

    #[track_caller]
    pub fn info(&self, msg: &str, attrs: &[Attr]) {
        self.log(Level::Info, msg, attrs);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str, attrs: &[Attr]) {
        self.log(Level::Warn, msg, attrs);
    }

    #[track_caller]
    pub fn error(&self, msg: &str, attrs: &[Attr]) {
        self.log(Level::Error, msg, attrs);
    }

    /// A logger that adds `key=value` to every record
    pub fn with(&self, key: &str, value: impl Into<Value>) -> Logger {
        self.with_attrs(vec![Attr::new(key, value)])
    }

    pub fn with_attrs(&self, attrs: Vec<Attr>) -> Logger {
        if attrs.is_empty() {
            return self.clone();
        }
        Logger::new(self.handler.with_attrs(attrs))
    }

    pub fn with_group(&self, name: &str) -> Logger {
        if name.is_empty() {
            return self.clone();
        }
        Logger::new(self.handler.with_group(name))
    }

    fn emit(&self, level: Level, msg: &str, attrs: Vec<Attr>, source: Source) {
        let record = Record::new(level, msg)
            .with_source(source)
            .with_attrs(attrs);
        let _ = self.handler.handle(&record);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

//! Forward `tracing` events into a [`Logger`]
//!
//! Libraries instrumented with `tracing` keep emitting through its macros;
//! the [`TracingBridge`] layer turns each event into a [`Record`] and hands
//! it to a logger, so their output is rendered by the same handler as the
//! application's own records.

use crate::attr::{Attr, Value};
use crate::global::default_logger;
use crate::level::Level;
use crate::logger::Logger;
use crate::record::{Record, Source};
use std::fmt;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// A tracing layer that logs every event through a [`Logger`]
///
/// With no explicit logger the layer looks up the global default on each
/// event, so installing a new default later redirects bridged output too.
#[derive(Clone, Debug, Default)]
pub struct TracingBridge {
    logger: Option<Logger>,
}

impl TracingBridge {
    /// Bridge into the global default logger
    pub fn new() -> Self {
        Self::default()
    }

    /// Bridge into a specific logger
    pub fn with_logger(logger: Logger) -> Self {
        Self {
            logger: Some(logger),
        }
    }

    fn logger(&self) -> Logger {
        match &self.logger {
            Some(logger) => logger.clone(),
            None => default_logger(),
        }
    }
}

/// Map a tracing level; `TRACE` has no counterpart and is folded into debug
pub fn level_from_tracing(level: &tracing::Level) -> Level {
    match *level {
        tracing::Level::ERROR => Level::Error,
        tracing::Level::WARN => Level::Warn,
        tracing::Level::INFO => Level::Info,
        tracing::Level::DEBUG | tracing::Level::TRACE => Level::Debug,
    }
}

impl<S> Layer<S> for TracingBridge
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = level_from_tracing(metadata.level());
        let logger = self.logger();
        if !logger.enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut record = Record::new(level, visitor.message).with_attrs(visitor.attrs);
        if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
            record = record.with_source(Source::new(file, line));
        }

        logger.log_record(record);
    }
}

/// Collects the `message` field and turns the rest into typed attributes
#[derive(Default)]
struct FieldVisitor {
    message: String,
    attrs: Vec<Attr>,
}

impl FieldVisitor {
    fn push(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.attrs.push(Attr::new(field.name(), value));
        }
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.into());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.push(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.push(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.push(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.push(field, value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{:?}", value).into());
    }
}

/// Install a [`TracingBridge`] into the global default logger as the global
/// tracing subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing_bridge() -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::prelude::*;

    tracing_subscriber::registry()
        .with(TracingBridge::new())
        .try_init()
}

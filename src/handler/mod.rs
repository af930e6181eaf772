use crate::attr::Attr;
use crate::error::Result;
use crate::level::Level;
use crate::record::Record;
use std::sync::Arc;

pub mod color;
pub mod json;
pub mod mock;
pub mod text;

pub use color::ColoredHandler;
pub use json::JsonHandler;
pub use mock::{LogEntry, MockHandler};
pub use text::TextHandler;

/// Options shared by the built-in handlers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandlerOptions {
    /// Minimum enabled level; `None` means the handler's own default
    pub level: Option<Level>,
    /// Render the call site of each record
    pub add_source: bool,
}

impl HandlerOptions {
    pub fn new(level: Level) -> Self {
        Self {
            level: Some(level),
            add_source: false,
        }
    }

    pub fn with_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }
}

/// A sink for log records
///
/// Handlers are immutable values. The two derivation methods return a new
/// handler carrying extra context and leave `self` untouched, so deriving
/// is safe while other threads are logging through the parent.
pub trait Handler: Send + Sync + 'static {
    /// Whether records at `level` would be handled
    fn enabled(&self, level: Level) -> bool;

    /// Render and emit one record
    fn handle(&self, record: &Record) -> Result<()>;

    /// A handler that also emits `attrs` with every record
    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler>;

    /// A handler that qualifies subsequent attributes with group `name`
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}

//! Log record passed from a [`Logger`](crate::Logger) to its handler

use crate::attr::Attr;
use crate::level::Level;
use chrono::{DateTime, Local};
use std::fmt;
use std::panic::Location;

/// Call-site location of a log statement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Source {
    pub file: &'static str,
    pub line: u32,
}

impl Source {
    pub fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the nearest caller not marked `#[track_caller]`
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }
}

impl From<&'static Location<'static>> for Source {
    fn from(location: &'static Location<'static>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A single log event
///
/// Built fresh for every log call; handlers receive it by reference and
/// never mutate it.
#[derive(Clone, Debug)]
pub struct Record {
    pub time: DateTime<Local>,
    pub level: Level,
    pub message: String,
    pub source: Option<Source>,
    /// Attributes given at the call site, in call order
    pub attrs: Vec<Attr>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            time: Local::now(),
            level,
            message: message.into(),
            source: None,
            attrs: Vec::new(),
        }
    }

    /// Builder-style method for setting the call site
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    /// Builder-style method for appending attributes
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    /// Builder-style method for overriding the timestamp
    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }
}

//! In-memory handler for asserting on emitted records

use super::Handler;
use crate::attr::Attr;
use crate::error::Result;
use crate::level::Level;
use crate::logger::Logger;
use crate::record::Record;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// A captured record
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
    /// Bound attributes followed by the record's own
    pub attrs: Vec<Attr>,
}

/// A handler that records every entry instead of writing it
///
/// Handlers derived with `with_attrs`/`with_group` append to the same entry
/// store, so one handle observes every logger built on top of it.
#[derive(Debug, Default)]
pub struct MockHandler {
    logs: Arc<Mutex<Vec<LogEntry>>>,
    attrs: Vec<Attr>,
    groups: Vec<String>,
}

impl MockHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A logger writing into a fresh mock, plus the mock itself
    pub fn logger() -> (Logger, Arc<MockHandler>) {
        let mock = Arc::new(MockHandler::new());
        (Logger::new(mock.clone()), mock)
    }

    /// Snapshot of all entries, oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.logs.lock().clone()
    }

    pub fn entries_by_level(&self, level: Level) -> Vec<LogEntry> {
        self.logs
            .lock()
            .iter()
            .filter(|entry| entry.level == level)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.logs.lock().clear();
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }
}

impl Handler for MockHandler {
    fn enabled(&self, _level: Level) -> bool {
        true
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let mut attrs = self.attrs.clone();
        attrs.extend(record.attrs.iter().cloned());

        self.logs.lock().push(LogEntry {
            level: record.level,
            message: record.message.clone(),
            attrs,
        });
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        let mut bound = self.attrs.clone();
        bound.extend(attrs);
        Arc::new(MockHandler {
            logs: self.logs.clone(),
            attrs: bound,
            groups: self.groups.clone(),
        })
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let mut groups = self.groups.clone();
        groups.push(name.to_string());
        Arc::new(MockHandler {
            logs: self.logs.clone(),
            attrs: self.attrs.clone(),
            groups,
        })
    }
}

impl fmt::Display for MockHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.logs.lock().iter() {
            let attrs: Vec<String> = entry.attrs.iter().map(|a| a.to_string()).collect();
            writeln!(f, "[{}] {} [{}]", entry.level, entry.message, attrs.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_entries() {
        let mock = MockHandler::new();
        mock.handle(&Record::new(Level::Info, "one").with_attrs(vec![Attr::new("k", "v")]))
            .unwrap();
        mock.handle(&Record::new(Level::Error, "two")).unwrap();

        let entries = mock.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "one");
        assert_eq!(entries[0].attrs, vec![Attr::new("k", "v")]);
        assert_eq!(mock.entries_by_level(Level::Error).len(), 1);
        assert!(mock.entries_by_level(Level::Debug).is_empty());
        assert!(Level::ALL.iter().all(|level| mock.enabled(*level)));

        assert_eq!(mock.to_string(), "[INFO] one [k=v]\n[ERROR] two []\n");

        mock.clear();
        assert!(mock.entries().is_empty());
    }

    #[test]
    fn test_derived_mock_shares_entries() {
        let mock = MockHandler::new();
        let child = mock.with_attrs(vec![Attr::new("request_id", "abc")]);
        let grouped = child.with_group("db");

        child.handle(&Record::new(Level::Info, "from child")).unwrap();
        grouped
            .handle(&Record::new(Level::Warn, "from group").with_attrs(vec![Attr::new("ms", 3)]))
            .unwrap();
        mock.handle(&Record::new(Level::Debug, "from parent")).unwrap();

        let entries = mock.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].attrs, vec![Attr::new("request_id", "abc")]);
        assert_eq!(
            entries[1].attrs,
            vec![Attr::new("request_id", "abc"), Attr::new("ms", 3)]
        );
        // Parent context is untouched
        assert!(entries[2].attrs.is_empty());
        assert!(mock.groups().is_empty());
    }
}

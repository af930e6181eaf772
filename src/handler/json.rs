//! Plain single-line JSON handler

use super::{Handler, HandlerOptions};
use crate::attr::Attr;
use crate::error::Result;
use crate::level::Level;
use crate::record::Record;
use crate::writer::LogWriter;
use chrono::SecondsFormat;
use serde_json::{json, Map, Value as JsonValue};
use std::sync::Arc;

/// Writes one compact JSON object per line
///
/// Keys are `time`, `level`, optional `source`, `msg`, then attributes.
/// Groups opened with [`Handler::with_group`] become nested objects.
#[derive(Debug, Clone)]
pub struct JsonHandler {
    opts: HandlerOptions,
    writer: LogWriter,
    groups: Vec<String>,
    /// Bound attributes with the group path that was open when they were added
    bound: Vec<(Vec<String>, Attr)>,
}

impl JsonHandler {
    pub fn new(writer: LogWriter, opts: HandlerOptions) -> Self {
        Self {
            opts,
            writer,
            groups: Vec::new(),
            bound: Vec::new(),
        }
    }
}

/// Insert `attr` below the nested objects named by `path`, creating them as
/// needed. A non-object value already stored under a group name is replaced.
fn insert_at(map: &mut Map<String, JsonValue>, path: &[String], attr: &Attr) -> Result<()> {
    let Some((name, rest)) = path.split_first() else {
        map.insert(attr.key.clone(), serde_json::to_value(&attr.value)?);
        return Ok(());
    };

    match map
        .entry(name.as_str())
        .or_insert_with(|| JsonValue::Object(Map::new()))
    {
        JsonValue::Object(inner) => insert_at(inner, rest, attr),
        slot => {
            let mut inner = Map::new();
            insert_at(&mut inner, rest, attr)?;
            *slot = JsonValue::Object(inner);
            Ok(())
        }
    }
}

impl Handler for JsonHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.opts.level.unwrap_or(Level::Info)
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let mut root = Map::new();
        root.insert(
            "time".to_string(),
            record.time.to_rfc3339_opts(SecondsFormat::AutoSi, true).into(),
        );
        root.insert("level".to_string(), record.level.as_str().into());
        if let Some(source) = record.source.filter(|_| self.opts.add_source) {
            root.insert(
                "source".to_string(),
                json!({ "file": source.file, "line": source.line }),
            );
        }
        root.insert("msg".to_string(), record.message.clone().into());

        for (path, attr) in &self.bound {
            insert_at(&mut root, path, attr)?;
        }
        for attr in &record.attrs {
            insert_at(&mut root, &self.groups, attr)?;
        }

        let mut line = serde_json::to_vec(&JsonValue::Object(root))?;
        line.push(b'\n');
        self.writer.write_all(&line)?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        let mut derived = self.clone();
        derived
            .bound
            .extend(attrs.into_iter().map(|attr| (self.groups.clone(), attr)));
        Arc::new(derived)
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let mut derived = self.clone();
        derived.groups.push(name.to_string());
        Arc::new(derived)
    }
}

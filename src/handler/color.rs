//! Colorized handler for human-readable console output
//!
//! Renders each record either as a short colored text block or as a
//! pretty-printed JSON object wrapped in the level's color. The level color
//! table is shared by both modes:
//!
//! | level  | color  | label   |
//! |--------|--------|---------|
//! | error  | red    | `ERROR` |
//! | warn   | yellow | `WARN ` |
//! | info   | green  | `INFO ` |
//! | debug  | blue   | `DEBUG` |

use super::{Handler, HandlerOptions};
use crate::attr::Attr;
use crate::error::Result;
use crate::level::Level;
use crate::record::Record;
use crate::writer::LogWriter;
use chrono::SecondsFormat;
use colored::Color;
use parking_lot::Mutex;
use serde_json::{Map, Value as JsonValue};
use std::fmt::Write as _;
use std::sync::Arc;

/// Escape sequence that restores the default terminal style
pub const RESET: &str = "\x1b[0m";

/// Foreground escape sequence for `color`.
///
/// Built straight from the color code so output does not depend on whether
/// stdout is a terminal.
pub fn escape(color: Color) -> String {
    format!("\x1b[{}m", color.to_fg_str())
}

/// Color and fixed-width label for a level
pub fn level_style(level: Level) -> (Color, &'static str) {
    match level {
        l if l >= Level::Error => (Color::Red, "ERROR"),
        l if l >= Level::Warn => (Color::Yellow, "WARN "),
        l if l >= Level::Info => (Color::Green, "INFO "),
        _ => (Color::Blue, "DEBUG"),
    }
}

/// A handler that writes colored records to a [`LogWriter`]
#[derive(Debug)]
pub struct ColoredHandler {
    opts: HandlerOptions,
    writer: LogWriter,
    /// Render buffer; holding it serializes format-and-write per handler
    buf: Mutex<String>,
    groups: Vec<String>,
    attrs: Vec<Attr>,
    use_json: bool,
}

impl ColoredHandler {
    pub fn new(writer: LogWriter, opts: HandlerOptions, use_json: bool) -> Self {
        Self {
            opts,
            writer,
            buf: Mutex::new(String::new()),
            groups: Vec::new(),
            attrs: Vec::new(),
            use_json,
        }
    }

    /// Attributes bound through [`Handler::with_attrs`], oldest first
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// Group names opened through [`Handler::with_group`].
    ///
    /// Groups are tracked only; rendering does not qualify keys with them.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn is_json(&self) -> bool {
        self.use_json
    }

    fn derive(&self, groups: Vec<String>, attrs: Vec<Attr>) -> Self {
        Self {
            opts: self.opts,
            writer: self.writer.clone(),
            buf: Mutex::new(String::new()),
            groups,
            attrs,
            use_json: self.use_json,
        }
    }

    fn render_text(&self, record: &Record, out: &mut String) {
        let (color, label) = level_style(record.level);
        let dark_gray = escape(Color::BrightBlack);
        let cyan = escape(Color::Cyan);

        // Header line: local wall-clock time, colored level label, message.
        let _ = writeln!(
            out,
            "{} {}{}{} {}",
            record.time.format("%H:%M:%S%.3f"),
            escape(color),
            label,
            RESET,
            record.message
        );

        // The call site, only when source capture is on and one was recorded.
        if let Some(source) = record.source.filter(|_| self.opts.add_source) {
            let _ = writeln!(out, "    {}Source: {}{}", dark_gray, source, RESET);
        }

        // Bound attributes first, then the record's own, one per line.
        if !self.attrs.is_empty() || !record.attrs.is_empty() {
            let _ = writeln!(out, "    {}Attributes:{}", dark_gray, RESET);
            for attr in self.attrs.iter().chain(record.attrs.iter()) {
                let _ = writeln!(out, "      {}{}{}: {}", cyan, attr.key, RESET, attr.value);
            }
        }
    }

    fn render_json(&self, record: &Record, out: &mut String) -> Result<()> {
        // Fixed keys first; the map keeps insertion order.
        let mut map = Map::new();
        map.insert(
            "time".to_string(),
            record.time.to_rfc3339_opts(SecondsFormat::Secs, true).into(),
        );
        map.insert("level".to_string(), record.level.as_str().into());
        map.insert("msg".to_string(), record.message.clone().into());

        if let Some(source) = record.source.filter(|_| self.opts.add_source) {
            map.insert("source".to_string(), source.to_string().into());
        }

        // Record attributes come last so they win over bound ones
        for attr in self.attrs.iter().chain(record.attrs.iter()) {
            map.insert(attr.key.clone(), serde_json::to_value(&attr.value)?);
        }

        // Serialize before touching `out` so a failure writes nothing.
        let body = serde_json::to_string_pretty(&JsonValue::Object(map))?;

        // Wrap the whole object in the level's color.
        let (color, _) = level_style(record.level);
        let _ = writeln!(out, "{}{}{}", escape(color), body, RESET);
        Ok(())
    }
}

impl Handler for ColoredHandler {
    fn enabled(&self, level: Level) -> bool {
        match self.opts.level {
            Some(min) => level >= min,
            None => true,
        }
    }

    fn handle(&self, record: &Record) -> Result<()> {
        // Hold the buffer lock across render and write so records from
        // concurrent callers never interleave.
        let mut buf = self.buf.lock();
        buf.clear();

        if self.use_json {
            self.render_json(record, &mut buf)?;
        } else {
            self.render_text(record, &mut buf);
        }

        self.writer.write_all(buf.as_bytes())?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        let mut bound = Vec::with_capacity(self.attrs.len() + attrs.len());
        bound.extend_from_slice(&self.attrs);
        bound.extend(attrs);
        Arc::new(self.derive(self.groups.clone(), bound))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let mut groups = self.groups.clone();
        groups.push(name.to_string());
        Arc::new(self.derive(groups, self.attrs.clone()))
    }
}

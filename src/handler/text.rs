//! Plain `key=value` line handler

use super::{Handler, HandlerOptions};
use crate::attr::{Attr, Value};
use crate::error::Result;
use crate::level::Level;
use crate::record::Record;
use crate::writer::LogWriter;
use chrono::SecondsFormat;
use std::sync::Arc;

/// Writes one uncolored `key=value` line per record
///
/// ```text
/// time=2024-05-01T10:00:00.000+02:00 level=INFO msg="user logged in" user=john
/// ```
///
/// Attributes added after [`Handler::with_group`] have their keys qualified
/// with the group path (`request.id=7`).
#[derive(Debug, Clone)]
pub struct TextHandler {
    opts: HandlerOptions,
    writer: LogWriter,
    groups: Vec<String>,
    /// Bound attributes, already rendered as ` key=value`
    bound: String,
}

impl TextHandler {
    pub fn new(writer: LogWriter, opts: HandlerOptions) -> Self {
        Self {
            opts,
            writer,
            groups: Vec::new(),
            bound: String::new(),
        }
    }

    fn prefix(&self) -> String {
        self.groups.iter().map(|g| format!("{}.", g)).collect()
    }
}

fn needs_quoting(s: &str) -> bool {
    s.is_empty()
        || s
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '"' || c == '=')
}

fn push_text(out: &mut String, s: &str) {
    if needs_quoting(s) {
        out.push_str(&format!("{:?}", s));
    } else {
        out.push_str(s);
    }
}

fn push_attr(out: &mut String, prefix: &str, attr: &Attr) {
    match &attr.value {
        Value::Group(attrs) => {
            let nested = format!("{}{}.", prefix, attr.key);
            for attr in attrs {
                push_attr(out, &nested, attr);
            }
        }
        value => {
            out.push(' ');
            push_text(out, &format!("{}{}", prefix, attr.key));
            out.push('=');
            push_text(out, &value.to_string());
        }
    }
}

impl Handler for TextHandler {
    fn enabled(&self, level: Level) -> bool {
        level >= self.opts.level.unwrap_or(Level::Info)
    }

    fn handle(&self, record: &Record) -> Result<()> {
        let mut out = format!(
            "time={} level={}",
            record.time.to_rfc3339_opts(SecondsFormat::Millis, true),
            record.level
        );

        if let Some(source) = record.source.filter(|_| self.opts.add_source) {
            out.push_str(" source=");
            push_text(&mut out, &source.to_string());
        }

        out.push_str(" msg=");
        push_text(&mut out, &record.message);
        out.push_str(&self.bound);

        let prefix = self.prefix();
        for attr in &record.attrs {
            push_attr(&mut out, &prefix, attr);
        }
        out.push('\n');

        self.writer.write_all(out.as_bytes())?;
        Ok(())
    }

    fn with_attrs(&self, attrs: Vec<Attr>) -> Arc<dyn Handler> {
        let mut derived = self.clone();
        let prefix = self.prefix();
        for attr in &attrs {
            push_attr(&mut derived.bound, &prefix, attr);
        }
        Arc::new(derived)
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let mut derived = self.clone();
        derived.groups.push(name.to_string());
        Arc::new(derived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Source;
    use crate::writer::MemoryWriter;

    fn handler(memory: &MemoryWriter) -> TextHandler {
        TextHandler::new(memory.log_writer(), HandlerOptions::new(Level::Debug))
    }

    #[test]
    fn test_text_line() {
        let memory = MemoryWriter::new();
        let record = Record::new(Level::Info, "user logged in")
            .with_attrs(vec![Attr::new("user", "john"), Attr::new("attempts", 3)]);
        handler(&memory).handle(&record).unwrap();

        let output = memory.contents();
        assert!(output.starts_with("time="));
        assert!(output.ends_with(" level=INFO msg=\"user logged in\" user=john attempts=3\n"));
        assert!(!output.contains('\x1b'));
    }

    #[test]
    fn test_quoting() {
        assert!(needs_quoting(""));
        assert!(needs_quoting("two words"));
        assert!(needs_quoting("a=b"));
        assert!(needs_quoting("say \"hi\""));
        assert!(!needs_quoting("plain"));
        assert!(!needs_quoting("192.168.1.1"));
    }

    #[test]
    fn test_groups_qualify_keys() {
        let memory = MemoryWriter::new();
        let grouped = handler(&memory)
            .with_attrs(vec![Attr::new("service", "api")])
            .with_group("request")
            .with_attrs(vec![Attr::new("id", 7)]);

        let record = Record::new(Level::Info, "done").with_attrs(vec![Attr::group(
            "timing",
            vec![Attr::new("ms", 12)],
        )]);
        grouped.handle(&record).unwrap();

        assert!(memory
            .contents()
            .ends_with(" msg=done service=api request.id=7 request.timing.ms=12\n"));
    }

    #[test]
    fn test_source_and_default_threshold() {
        let memory = MemoryWriter::new();
        let opts = HandlerOptions {
            level: None,
            add_source: true,
        };
        let handler = TextHandler::new(memory.log_writer(), opts);
        assert!(!handler.enabled(Level::Debug));
        assert!(handler.enabled(Level::Info));

        handler
            .handle(&Record::new(Level::Warn, "slow").with_source(Source::new("src/db.rs", 9)))
            .unwrap();
        assert!(memory.contents().contains(" level=WARN source=src/db.rs:9 msg=slow\n"));
    }
}

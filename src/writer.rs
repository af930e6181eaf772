//! Shared output sinks for handlers

use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// A writer shared by a handler and every handler derived from it.
///
/// Cloning is cheap and yields a handle to the same sink. Each call to
/// [`LogWriter::write_all`] holds the sink lock for one complete write, so a
/// record's bytes are never interleaved with another record's.
#[derive(Clone)]
pub struct LogWriter {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl LogWriter {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Write one fully rendered record and flush it
    pub fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        let mut sink = self.inner.lock();
        sink.write_all(buf)?;
        sink.flush()
    }

    /// Whether two handles point at the same sink
    pub fn same_sink(&self, other: &LogWriter) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for LogWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogWriter").finish_non_exhaustive()
    }
}

/// An in-memory sink, mostly useful for asserting on rendered output
#[derive(Clone, Debug, Default)]
pub struct MemoryWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.buf.lock().clear();
    }

    /// A [`LogWriter`] that appends into this buffer
    pub fn log_writer(&self) -> LogWriter {
        LogWriter::new(self.clone())
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

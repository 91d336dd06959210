use std::fs::File;
use std::io::{self, LineWriter, Write};
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

/// Destination of finished records.
///
/// A `Sink` wraps any [`Write`] implementation behind a mutex. Each record is
/// assembled in memory and handed over with a single `write_all`, so records
/// written from different threads come out whole in practice, although this
/// is not something callers should rely on.
///
/// The writer can be swapped at runtime with [`Sink::redirect`].
///
/// # Examples
///
/// ```
/// # use exprlog::{Sink, SharedBuffer};
/// let buffer = SharedBuffer::new();
/// let sink = Sink::new(buffer.clone());
/// sink.write_record(b"x = 1\n", false).unwrap();
/// assert_eq!(buffer.contents(), "x = 1\n");
/// ```
pub struct Sink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Sink {
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    /// Standard output, the default destination of the global logger.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    /// Discards everything.
    pub fn null() -> Self {
        Self::new(io::sink())
    }

    /// Creates (or truncates) `path` and writes records to it, flushing at
    /// every newline.
    pub fn file(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "opened file sink");
        Ok(Self::new(LineWriter::new(file)))
    }

    /// Replaces the underlying writer and returns the previous one.
    ///
    /// The previous writer is flushed before it is handed back.
    pub fn redirect(&self, out: Box<dyn Write + Send>) -> Box<dyn Write + Send> {
        let mut guard = self.out.lock();
        let mut previous = std::mem::replace(&mut *guard, out);
        if let Err(err) = previous.flush() {
            tracing::trace!(error = %err, "flushing redirected sink failed");
        }
        tracing::debug!("sink redirected");
        previous
    }

    /// Writes one finished record, optionally flushing afterwards.
    pub fn write_record(&self, record: &[u8], flush: bool) -> io::Result<()> {
        let mut out = self.out.lock();
        out.write_all(record)?;
        if flush {
            out.flush()?;
        }
        Ok(())
    }

    pub fn flush(&self) -> io::Result<()> {
        self.out.lock().flush()
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}

/// Cloneable in-memory writer, handy for capturing records.
///
/// All clones share the same buffer.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    data: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.data.lock()).into_owned()
    }

    /// Like [`contents`](Self::contents), but also empties the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.data.lock());
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn clear(&self) {
        self.data.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.data.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl std::fmt::Debug for SharedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedBuffer").field("len", &self.len()).finish()
    }
}

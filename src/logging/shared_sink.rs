use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use tracing_subscriber::fmt::MakeWriter;

type BoxedWrite = Box<dyn Write + Send>;

/// A swappable output stream shared by a logger and all of its subloggers.
#[derive(Clone)]
pub struct SharedSink {
    inner: Arc<Mutex<BoxedWrite>>,
}

impl SharedSink {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self::from_boxed(Box::new(writer))
    }

    #[must_use]
    pub fn from_boxed(writer: BoxedWrite) -> Self {
        Self {
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Redirect every logger sharing this sink to `writer`.
    pub fn replace(&self, writer: impl Write + Send + 'static) {
        *self.lock() = Box::new(writer);
    }

    pub fn flush(&self) {
        // nothing useful to do with a failed flush of a log stream
        let _ = self.lock().flush();
    }

    fn lock(&self) -> MutexGuard<'_, BoxedWrite> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for SharedSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSink").finish_non_exhaustive()
    }
}

/// Exclusive access to the sink for the duration of one formatted event.
pub struct SinkGuard<'a> {
    guard: MutexGuard<'a, BoxedWrite>,
}

impl std::fmt::Debug for SinkGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkGuard").finish_non_exhaustive()
    }
}

impl Write for SinkGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.guard.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.guard.write_all(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedSink {
    type Writer = SinkGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SinkGuard { guard: self.lock() }
    }
}

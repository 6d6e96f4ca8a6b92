use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

/// In-memory log destination that can be handed to a logger and read back.
#[derive(Debug, Clone, Default)]
pub struct TestBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl TestBuffer {
    /// Return everything written so far and clear the buffer.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.inner.lock().unwrap_or_else(PoisonError::into_inner));
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for TestBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

static PROCESS_GLOBALS: Mutex<()> = Mutex::new(());

/// Serialize tests that touch the default logger or the `log` facade.
pub fn serial() -> MutexGuard<'static, ()> {
    PROCESS_GLOBALS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

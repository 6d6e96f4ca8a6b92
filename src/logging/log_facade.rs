//! Bridge from the `log` crate facade into a [`Logger`].
//!
//! The bridge is registered with `log::set_logger` the first time a logger is
//! adopted. After that, adopting swaps the target and [`release`] detaches it.

use crate::logging::Logger;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::RwLock;
use tracing::Level;

static ADOPTED: RwLock<Option<Logger>> = RwLock::new(None);
static INSTALLED: Mutex<bool> = Mutex::new(false);
static BRIDGE: FacadeBridge = FacadeBridge;

#[derive(Debug)]
struct FacadeBridge;

/// Route `log` records to `logger` from now on.
///
/// # Errors
///
/// Returns an error if a different `log` backend was installed first.
pub fn adopt(logger: Logger) -> eyre::Result<()> {
    {
        let mut installed = INSTALLED.lock().unwrap_or_else(PoisonError::into_inner);
        if !*installed {
            log::set_logger(&BRIDGE).map_err(|error| {
                eyre::eyre!("Another `log` backend is already installed: {error}")
            })?;
            log::set_max_level(log::LevelFilter::Trace);
            *installed = true;
        }
    }
    *ADOPTED.write().unwrap_or_else(PoisonError::into_inner) = Some(logger);
    Ok(())
}

/// Stop forwarding `log` records. Returns the logger that was adopted, if any.
pub fn release() -> Option<Logger> {
    ADOPTED
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
}

/// The logger currently receiving `log` records.
#[must_use]
pub fn adopted() -> Option<Logger> {
    ADOPTED
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn to_tracing_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::ERROR,
        log::Level::Warn => Level::WARN,
        log::Level::Info => Level::INFO,
        log::Level::Debug => Level::DEBUG,
        log::Level::Trace => Level::TRACE,
    }
}

impl log::Log for FacadeBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        adopted().is_some_and(|logger| logger.is_enabled(to_tracing_level(metadata.level())))
    }

    fn log(&self, record: &log::Record<'_>) {
        if let Some(logger) = adopted() {
            logger.log(to_tracing_level(record.level()), record.args(), &[]);
        }
    }

    fn flush(&self) {
        if let Some(logger) = adopted() {
            logger.flush();
        }
    }
}

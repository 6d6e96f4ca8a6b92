use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use tracing::Level;
use tracing::level_filters::LevelFilter;

/// The verbosity threshold shared by a logger and all of its subloggers.
///
/// Read on every event by the logger and by the subscriber filter, so a change
/// is visible to the next event without touching the callsite interest cache.
#[derive(Debug, Clone)]
pub struct SharedLevel {
    inner: Arc<RwLock<LevelFilter>>,
}

impl SharedLevel {
    #[must_use]
    pub fn new(level: LevelFilter) -> Self {
        Self {
            inner: Arc::new(RwLock::new(level)),
        }
    }

    #[must_use]
    pub fn get(&self) -> LevelFilter {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, level: LevelFilter) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    #[must_use]
    pub fn enables(&self, level: &Level) -> bool {
        *level <= self.get()
    }
}

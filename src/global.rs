//! Package-level logging through one process-wide default [`Logger`].
//!
//! The default is installed only by [`init`] and cleared by [`reset`]. Until
//! then, every package function goes through a throwaway logger built from the
//! process invocation (named after the executable, leveled by launch mode).
//! Nothing is kept from those calls, so a [`set_level`] before [`init`] has no
//! lasting effect.

use crate::logging::Fields;
use crate::logging::LogWriter;
use crate::logging::Logger;
use crate::logging::LoggerBuilder;
use std::fmt::Display;
use std::sync::PoisonError;
use std::sync::RwLock;
use tracing::Level;
use tracing::level_filters::LevelFilter;

static DEFAULT: RwLock<Option<Logger>> = RwLock::new(None);

/// Install `logger` as the default and return it.
pub fn init(logger: Logger) -> Logger {
    *DEFAULT.write().unwrap_or_else(PoisonError::into_inner) = Some(logger.clone());
    logger
}

/// Remove the default logger, returning it if one was installed.
pub fn reset() -> Option<Logger> {
    DEFAULT
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
}

#[must_use]
pub fn is_initialized() -> bool {
    DEFAULT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .is_some()
}

/// The installed default logger, if any.
#[must_use]
pub fn current() -> Option<Logger> {
    DEFAULT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

fn current_or_standalone() -> Logger {
    current().unwrap_or_else(|| LoggerBuilder::new().assemble(None))
}

/// A logger for library code: a sublogger of the default when one is
/// installed, otherwise a standalone logger called `name`.
///
/// Never installs a default, so libraries do not take over the application's
/// logging.
#[must_use]
pub fn library_logger(name: &str) -> Logger {
    match current() {
        Some(logger) => logger.named(name),
        None => LoggerBuilder::new().with_name(name).assemble(None),
    }
}

pub fn log(level: Level, message: impl Display, fields: &Fields<'_>) {
    current_or_standalone().log(level, message, fields);
}

pub fn trace(message: impl Display, fields: &Fields<'_>) {
    current_or_standalone().trace(message, fields);
}

pub fn debug(message: impl Display, fields: &Fields<'_>) {
    current_or_standalone().debug(message, fields);
}

pub fn info(message: impl Display, fields: &Fields<'_>) {
    current_or_standalone().info(message, fields);
}

pub fn warn(message: impl Display, fields: &Fields<'_>) {
    current_or_standalone().warn(message, fields);
}

pub fn error(message: impl Display, fields: &Fields<'_>) {
    current_or_standalone().error(message, fields);
}

/// Log at INFO; accepts `format_args!`.
pub fn print(message: impl Display) {
    current_or_standalone().print(message);
}

#[must_use]
pub fn is_trace() -> bool {
    current_or_standalone().is_trace()
}

#[must_use]
pub fn is_debug() -> bool {
    current_or_standalone().is_debug()
}

#[must_use]
pub fn is_info() -> bool {
    current_or_standalone().is_info()
}

#[must_use]
pub fn is_warn() -> bool {
    current_or_standalone().is_warn()
}

#[must_use]
pub fn is_error() -> bool {
    current_or_standalone().is_error()
}

#[must_use]
pub fn level() -> LevelFilter {
    current_or_standalone().level()
}

pub fn set_level(level: impl Into<LevelFilter>) {
    current_or_standalone().set_level(level);
}

#[must_use]
pub fn named(name: &str) -> Logger {
    current_or_standalone().named(name)
}

#[must_use]
pub fn reset_named(name: &str) -> Logger {
    current_or_standalone().reset_named(name)
}

#[must_use]
pub fn with(fields: &Fields<'_>) -> Logger {
    current_or_standalone().with(fields)
}

#[must_use]
pub fn writer() -> LogWriter {
    current_or_standalone().writer()
}

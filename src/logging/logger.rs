use crate::invocation::LaunchMode;
use crate::logging::fields::Fields;
use crate::logging::fields::OwnedFields;
use crate::logging::fields::render_json_object;
use crate::logging::fields::render_pairs;
use crate::logging::fields::to_owned_fields;
use crate::logging::log_facade;
use crate::logging::log_writer::LogWriter;
use crate::logging::logger_builder::LoggerBuilder;
use crate::logging::shared_level::SharedLevel;
use crate::logging::shared_sink::SharedSink;
use std::fmt::Display;
use std::io::Write;
use std::sync::Arc;
use tracing::Dispatch;
use tracing::Level;
use tracing::level_filters::LevelFilter;

/// Backend state shared by a logger and every sublogger derived from it.
pub(crate) struct LoggerCore {
    pub(crate) dispatch: Dispatch,
    pub(crate) level: SharedLevel,
    pub(crate) sink: SharedSink,
}

/// A named, leveled logger.
///
/// Cloning is cheap. Subloggers created with [`Logger::named`],
/// [`Logger::reset_named`] and [`Logger::with`] share the level and the output
/// stream of the logger they came from.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    implied_fields: Arc<OwnedFields>,
    launch_mode: LaunchMode,
    core: Arc<LoggerCore>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("implied_fields", &self.implied_fields)
            .field("launch_mode", &self.launch_mode)
            .field("level", &self.level())
            .finish_non_exhaustive()
    }
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub(crate) fn from_parts(name: String, launch_mode: LaunchMode, core: LoggerCore) -> Self {
        Self {
            name: name.into(),
            implied_fields: Arc::default(),
            launch_mode,
            core: Arc::new(core),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The launch mode detected when the root logger was built.
    #[must_use]
    pub fn launch_mode(&self) -> LaunchMode {
        self.launch_mode
    }

    /// Emit `message` with `fields` at `level`, e.g.
    /// `logger.log(Level::INFO, "listening", &[("port", &8080)])`.
    pub fn log(&self, level: Level, message: impl Display, fields: &Fields<'_>) {
        if !self.is_enabled(level) {
            return;
        }
        let mut pairs = (*self.implied_fields).clone();
        pairs.extend(to_owned_fields(fields));
        let rendered = render_pairs(&pairs);
        let structured = render_json_object(&pairs);

        let logger = &*self.name;
        let kv = rendered.as_str();
        let kv_json = structured.as_str();
        tracing::dispatcher::with_default(&self.core.dispatch, || match level {
            Level::TRACE => tracing::trace!(logger, kv, kv_json, "{message}"),
            Level::DEBUG => tracing::debug!(logger, kv, kv_json, "{message}"),
            Level::INFO => tracing::info!(logger, kv, kv_json, "{message}"),
            Level::WARN => tracing::warn!(logger, kv, kv_json, "{message}"),
            _ => tracing::error!(logger, kv, kv_json, "{message}"),
        });
    }

    pub fn trace(&self, message: impl Display, fields: &Fields<'_>) {
        self.log(Level::TRACE, message, fields);
    }

    pub fn debug(&self, message: impl Display, fields: &Fields<'_>) {
        self.log(Level::DEBUG, message, fields);
    }

    pub fn info(&self, message: impl Display, fields: &Fields<'_>) {
        self.log(Level::INFO, message, fields);
    }

    pub fn warn(&self, message: impl Display, fields: &Fields<'_>) {
        self.log(Level::WARN, message, fields);
    }

    pub fn error(&self, message: impl Display, fields: &Fields<'_>) {
        self.log(Level::ERROR, message, fields);
    }

    /// Log at INFO without fields, the way a plain print-style logger would.
    /// Accepts `format_args!` for printf-like use.
    pub fn print(&self, message: impl Display) {
        self.log(Level::INFO, message, &[]);
    }

    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.core.level.enables(&level)
    }

    #[must_use]
    pub fn is_trace(&self) -> bool {
        self.is_enabled(Level::TRACE)
    }

    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.is_enabled(Level::DEBUG)
    }

    #[must_use]
    pub fn is_info(&self) -> bool {
        self.is_enabled(Level::INFO)
    }

    #[must_use]
    pub fn is_warn(&self) -> bool {
        self.is_enabled(Level::WARN)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_enabled(Level::ERROR)
    }

    #[must_use]
    pub fn level(&self) -> LevelFilter {
        self.core.level.get()
    }

    /// Change the level of this logger and every logger sharing its backend.
    /// The next event already sees the new level.
    pub fn set_level(&self, level: impl Into<LevelFilter>) {
        self.core.level.set(level.into());
    }

    /// Sublogger whose name is this logger's name with `.{name}` appended.
    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        if self.name.is_empty() {
            self.reset_named(name)
        } else {
            self.reset_named(&format!("{}.{name}", self.name))
        }
    }

    /// Sublogger with a completely new name.
    #[must_use]
    pub fn reset_named(&self, name: &str) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Sublogger that appends `fields` to every line it writes.
    #[must_use]
    pub fn with(&self, fields: &Fields<'_>) -> Self {
        let implied_fields = if fields.is_empty() {
            Arc::clone(&self.implied_fields)
        } else {
            let mut pairs = (*self.implied_fields).clone();
            pairs.extend(to_owned_fields(fields));
            Arc::new(pairs)
        };
        Self {
            implied_fields,
            ..self.clone()
        }
    }

    /// Send output of this logger and all loggers sharing its backend to `writer`.
    pub fn set_writer(&self, writer: impl Write + Send + 'static) {
        self.core.sink.replace(writer);
    }

    pub fn flush(&self) {
        self.core.sink.flush();
    }

    /// An [`std::io::Write`] for frameworks that only know how to print.
    /// Each written line becomes one log message.
    #[must_use]
    pub fn writer(&self) -> LogWriter {
        LogWriter::new(self.clone())
    }

    /// Forward records of the `log` crate facade to this logger.
    ///
    /// # Errors
    ///
    /// Returns an error if a different `log` backend has already been installed.
    pub fn adopt_log_facade(&self) -> eyre::Result<()> {
        log_facade::adopt(self.clone())
    }
}

use crate::invocation::InvocationPath;
use crate::logging::LEVEL_ENV_VAR;
use crate::logging::Logger;
use crate::logging::hcl_format::HclFormat;
use crate::logging::json_format::JsonFormat;
use crate::logging::logger::LoggerCore;
use crate::logging::shared_level::SharedLevel;
use crate::logging::shared_sink::SharedSink;
use eyre::WrapErr;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use tracing::Dispatch;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::dynamic_filter_fn;
use tracing_subscriber::prelude::*;

/// Options for constructing a [`Logger`].
///
/// Anything left unset is derived from how the process was invoked: the name
/// from the executable name and the level from the launch mode, unless
/// `TEAMY_HCL_LEVEL` names a level.
pub struct LoggerBuilder {
    name: Option<String>,
    level: Option<LevelFilter>,
    writer: Option<Box<dyn Write + Send>>,
    json_file: Option<PathBuf>,
    with_time: bool,
    invocation_path: Option<InvocationPath<'static>>,
}

impl std::fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("custom_writer", &self.writer.is_some())
            .field("json_file", &self.json_file)
            .field("with_time", &self.with_time)
            .field("invocation_path", &self.invocation_path)
            .finish()
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: None,
            level: None,
            writer: None,
            json_file: None,
            with_time: true,
            invocation_path: None,
        }
    }

    /// Use `name` instead of the executable name. An empty name is allowed and
    /// produces lines without a name prefix.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<LevelFilter>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Like [`LoggerBuilder::with_level`] but keeps automatic selection for `None`.
    #[must_use]
    pub fn with_optional_level(mut self, level: Option<LevelFilter>) -> Self {
        self.level = level.or(self.level);
        self
    }

    /// Write human-readable lines to `writer` instead of stderr.
    #[must_use]
    pub fn with_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Additionally write JSON lines to the file at `path`.
    #[must_use]
    pub fn with_json_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.json_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_time(mut self, with_time: bool) -> Self {
        self.with_time = with_time;
        self
    }

    /// Classify `path` instead of the `argv[0]` of the current process.
    #[must_use]
    pub fn with_invocation_path(mut self, path: impl Into<InvocationPath<'static>>) -> Self {
        self.invocation_path = Some(path.into());
        self
    }

    /// Build the logger.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON log file or its parent directory cannot be
    /// created.
    pub fn build(mut self) -> eyre::Result<Logger> {
        let json_sink = match self.json_file.take() {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).wrap_err_with(|| {
                        format!("Failed to create log directory {}", parent.display())
                    })?;
                }
                let file = File::create(&path)
                    .wrap_err_with(|| format!("Failed to create JSON log {}", path.display()))?;
                Some(SharedSink::new(file))
            }
            None => None,
        };
        Ok(self.assemble(json_sink))
    }

    /// Build without a JSON file, which cannot fail.
    pub(crate) fn assemble(self, json_sink: Option<SharedSink>) -> Logger {
        let invocation = self
            .invocation_path
            .unwrap_or_else(InvocationPath::from_process);
        let launch_mode = invocation.launch_mode();
        let level = self
            .level
            .or_else(level_from_env)
            .unwrap_or_else(|| launch_mode.default_level());
        let name = self
            .name
            .unwrap_or_else(|| invocation.executable_name().to_owned());
        let sink = match self.writer {
            Some(writer) => SharedSink::from_boxed(writer),
            None => SharedSink::new(std::io::stderr()),
        };

        // Evaluated per event, so callsites are never cached as disabled.
        let level = SharedLevel::new(level);
        let filter_level = level.clone();
        let filter_layer =
            dynamic_filter_fn(move |metadata, _cx| filter_level.enables(metadata.level()));
        let hcl_layer = tracing_subscriber::fmt::layer()
            .event_format(HclFormat::new(self.with_time))
            .with_writer(sink.clone());
        let json_layer = json_sink.map(|json_sink| {
            tracing_subscriber::fmt::layer()
                .event_format(JsonFormat)
                .with_writer(json_sink)
        });
        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(hcl_layer)
            .with(json_layer);

        let core = LoggerCore {
            dispatch: Dispatch::new(subscriber),
            level,
            sink,
        };
        Logger::from_parts(name, launch_mode, core)
    }
}

fn level_from_env() -> Option<LevelFilter> {
    std::env::var(LEVEL_ENV_VAR).ok()?.trim().parse().ok()
}

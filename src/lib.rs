//! Library root for the `teamy-hcl` crate.
//!
//! Painless leveled logging on top of `tracing`:
//! - loggers named after the running executable,
//! - a default level picked from how the process was launched (a regular
//!   build logs WARN and up, an ephemeral build-and-run INFO, a test binary DEBUG),
//! - an optional package-level default logger in [`global`],
//! - an opt-in bridge that routes the `log` crate facade into a logger.
//!
//! ```no_run
//! let logger = teamy_hcl::Logger::builder().build()?;
//! logger.info("listening", &[("port", &8080)]);
//! logger.named("web").print(format_args!("{} routes loaded", 12));
//! # Ok::<(), eyre::Report>(())
//! ```

pub mod cli;
pub mod global;
pub mod invocation;
pub mod logging;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::invocation::InvocationPath;
pub use crate::invocation::LaunchMode;
pub use crate::logging::Logger;
pub use crate::logging::LoggerBuilder;

/// Re-export the default JSON log path helper.
pub use crate::logging::default_json_log_path;

pub use tracing::Level;
pub use tracing::level_filters::LevelFilter;

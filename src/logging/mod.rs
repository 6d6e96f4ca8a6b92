pub mod fields;
pub mod hcl_format;
pub mod json_format;
pub mod log_facade;
pub mod log_writer;
mod logger;
pub mod logger_builder;
pub mod shared_level;
pub mod shared_sink;

pub use fields::Fields;
pub use log_writer::LogWriter;
pub use logger::Logger;
pub use logger_builder::LoggerBuilder;

use chrono::Local;
use std::path::PathBuf;

/// Environment variable consulted for the level when none is set explicitly,
/// e.g. `TEAMY_HCL_LEVEL=trace`.
pub const LEVEL_ENV_VAR: &str = "TEAMY_HCL_LEVEL";

/// Return a default JSON log path when the user requests automatic JSON path selection.
///
/// The format uses a timestamp to avoid collisions: `teamy_hcl_log_{TIMESTAMP}.jsonl`
#[must_use]
pub fn default_json_log_path() -> PathBuf {
    let timestamp = Local::now().format("%Y-%m-%d_%Hh%Mm%Ss");
    PathBuf::from(format!("teamy_hcl_log_{timestamp}.jsonl"))
}

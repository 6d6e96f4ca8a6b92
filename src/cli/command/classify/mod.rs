mod classify_args;

pub use classify_args::ClassifyArgs;
pub use classify_args::OutputFormat;

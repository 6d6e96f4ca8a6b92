pub mod classification;
pub mod invocation_path;
pub mod launch_mode;

pub use classification::Classification;
pub use invocation_path::InvocationPath;
pub use launch_mode::LaunchMode;

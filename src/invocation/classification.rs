use crate::invocation::invocation_path::InvocationPath;
use crate::invocation::launch_mode::LaunchMode;
use serde::Serialize;
use std::fmt::Display;

/// Everything the classifier derives from one invocation path, in a shape
/// suitable for printing or serializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub path: String,
    pub launch_mode: LaunchMode,
    pub is_ephemeral_run: bool,
    pub is_test_binary: bool,
    pub executable_name: String,
    pub default_level: String,
}

impl From<&InvocationPath<'_>> for Classification {
    fn from(path: &InvocationPath<'_>) -> Self {
        let launch_mode = path.launch_mode();
        Self {
            path: path.as_str().to_owned(),
            launch_mode,
            is_ephemeral_run: path.is_ephemeral_run(),
            is_test_binary: path.is_test_binary(),
            executable_name: path.executable_name().to_owned(),
            default_level: launch_mode.default_level().to_string(),
        }
    }
}

impl Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{path}\tmode={mode} ephemeral_run={run} test_binary={test} name={name:?} level={level}",
            path = self.path,
            mode = self.launch_mode,
            run = self.is_ephemeral_run,
            test = self.is_test_binary,
            name = self.executable_name,
            level = self.default_level,
        )
    }
}

// Command submodules are declared inside the `command` module directory.

pub mod global_args;
pub mod json_log_behaviour;
pub mod to_args;
mod command;

pub use command::Command;
pub use command::classify::ClassifyArgs;
pub use command::classify::OutputFormat;
pub use command::demo::DemoArgs;

use crate::cli::global_args::GlobalArgs;
use arbitrary::Arbitrary;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use to_args::Invocable;
use to_args::ToArgs;

#[derive(Parser, Arbitrary, PartialEq, Debug)]
#[clap(version)]
pub struct Cli {
    #[clap(flatten)]
    pub global_args: GlobalArgs,
    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Invoke the CLI with the parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn invoke(self) -> eyre::Result<()> {
        let invocation = self.display_invocation();
        self.command.invoke(&self.global_args, &invocation)
    }

    #[must_use]
    pub fn display_invocation(&self) -> String {
        let mut args = self.to_args();
        // Prepend the executable name
        let path_to_exe = self.path_to_exe();
        args.insert(
            0,
            path_to_exe
                .file_name()
                .unwrap_or(path_to_exe.as_os_str())
                .to_owned(),
        );
        args.iter()
            .map(|arg| arg.to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ToArgs for Cli {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        args.extend(self.global_args.to_args());
        args.extend(self.command.to_args());
        args
    }
}

impl Invocable for Cli {
    fn path_to_exe(&self) -> PathBuf {
        std::env::current_exe().unwrap_or_else(|_| {
            PathBuf::from(crate::invocation::InvocationPath::from_process().as_str())
        })
    }

    fn args(&self) -> Vec<OsString> {
        self.to_args()
    }
}

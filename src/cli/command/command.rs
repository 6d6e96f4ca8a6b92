use crate::cli::command::classify::ClassifyArgs;
use crate::cli::command::demo::DemoArgs;
use crate::cli::global_args::GlobalArgs;
use crate::cli::to_args::ToArgs;
use arbitrary::Arbitrary;
use clap::Subcommand;
use std::ffi::OsString;

/// Teamy HCL commands
#[derive(Subcommand, Arbitrary, PartialEq, Debug)]
pub enum Command {
    /// Classify invocation paths by launch mode and executable name
    Classify(ClassifyArgs),
    /// Emit sample lines through the default logger
    Demo(DemoArgs),
}

impl Command {
    /// Invoke the command with global arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if logging initialization fails or the command execution fails.
    pub fn invoke(self, global_args: &GlobalArgs, invocation: &str) -> eyre::Result<()> {
        let logger = global_args.init_logging()?;
        logger.debug("Invoked", &[("command_line", &invocation)]);
        match self {
            Command::Classify(args) => args.invoke(&logger),
            Command::Demo(args) => args.invoke(&logger),
        }
    }
}

impl ToArgs for Command {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        match self {
            Command::Classify(classify_args) => {
                args.push("classify".into());
                args.extend(classify_args.to_args());
            }
            Command::Demo(demo_args) => {
                args.push("demo".into());
                args.extend(demo_args.to_args());
            }
        }
        args
    }
}

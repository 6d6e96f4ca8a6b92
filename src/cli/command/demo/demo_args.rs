use crate::cli::to_args::ToArgs;
use crate::logging::Logger;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use tracing::Level;

#[derive(Args, Arbitrary, PartialEq, Debug)]
pub struct DemoArgs {
    /// Name of the sublogger used at the end of the demo
    #[arg(long, default_value = "web")]
    pub sublogger: String,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            sublogger: "web".to_owned(),
        }
    }
}

impl DemoArgs {
    /// Emit a tour of the logger: print-style calls, every level, a level
    /// change, a `log` facade record and a sublogger.
    ///
    /// # Errors
    ///
    /// Currently infallible; returns `Result` to match the other commands.
    pub fn invoke(self, logger: &Logger) -> eyre::Result<()> {
        let invocation = crate::invocation::InvocationPath::from_process();
        let args: Vec<String> = std::env::args().collect();

        logger.print("I am a logger named after the executable");
        logger.print(format_args!("But I got rid of some parts in {invocation}"));
        logger.error(format_args!("I am getting {} bored", "really"), &[]);
        logger.error("I got called with", &[("args", &format!("{args:?}"))]);

        logger.warn("I am visible in build code", &[]);
        logger.info("I am visible when started by an ephemeral run", &[]);
        logger.debug("I am visible when started as a test binary", &[]);
        logger.trace("I am not visible", &[]);
        let previous = logger.level();
        logger.set_level(Level::TRACE);
        logger.trace("now you can see me", &[]);

        log::info!("I look the same as {}", "Logger::print");

        let sublogger = logger.named(&self.sublogger);
        sublogger.info("Start of sublogger logs", &[("launch_mode", &logger.launch_mode())]);

        logger.set_level(previous);
        logger.flush();
        Ok(())
    }
}

impl ToArgs for DemoArgs {
    fn to_args(&self) -> Vec<OsString> {
        vec![format!("--sublogger={}", self.sublogger).into()]
    }
}

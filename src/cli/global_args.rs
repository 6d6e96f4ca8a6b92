use crate::cli::json_log_behaviour::JsonLogBehaviour;
use crate::cli::to_args::ToArgs;
use crate::global;
use crate::logging::Logger;
use arbitrary::Arbitrary;
use clap::Args;
use std::ffi::OsString;
use tracing::level_filters::LevelFilter;

#[derive(Args, Default, Arbitrary, PartialEq, Debug)]
pub struct GlobalArgs {
    /// Enable debug logging instead of the level picked from the launch mode
    #[clap(long, global = true)]
    pub debug: bool,

    /// Emit structured JSON logs alongside stderr output.
    /// Optionally specify a filename; if not provided, a timestamped filename will be generated.
    #[clap(
        long,
        global = true,
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "",
        require_equals = false
    )]
    json: Option<String>,
}

impl GlobalArgs {
    /// `None` keeps the level chosen from how the binary was launched.
    #[must_use]
    pub fn log_level(&self) -> Option<LevelFilter> {
        self.debug.then_some(LevelFilter::DEBUG)
    }

    /// Determine how JSON structured logs should be handled based on the --json flag.
    #[must_use]
    pub fn json_log_behaviour(&self) -> JsonLogBehaviour {
        match &self.json {
            None => JsonLogBehaviour::None,
            Some(s) if s.is_empty() => JsonLogBehaviour::SomeAutomaticPath,
            Some(path) => JsonLogBehaviour::Some(path.into()),
        }
    }

    /// Build the default logger for this run, install it and let it receive
    /// records from the `log` facade.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON log file cannot be created or another `log`
    /// backend is already installed.
    pub fn init_logging(&self) -> eyre::Result<Logger> {
        let json_path = self.json_log_behaviour().get_path().map(|path| path.into_owned());
        let mut builder = Logger::builder().with_optional_level(self.log_level());
        if let Some(path) = &json_path {
            builder = builder.with_json_file(path);
        }
        let logger = global::init(builder.build()?);
        logger.adopt_log_facade()?;

        if let Some(path) = &json_path {
            logger.info("JSON log output initialized", &[("path", &path.display())]);
        }
        logger.debug(
            "Logging initialized",
            &[("level", &logger.level()), ("mode", &logger.launch_mode())],
        );
        Ok(logger)
    }
}

impl ToArgs for GlobalArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if self.debug {
            args.push("--debug".into());
        }
        if let Some(json) = &self.json {
            // the `=` form keeps an empty or dash-leading value from swallowing the next argument
            args.push(format!("--json={json}").into());
        }
        args
    }
}

#[cfg(test)]
mod test {
    use super::GlobalArgs;
    use crate::cli::json_log_behaviour::JsonLogBehaviour;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn debug_overrides_launch_mode_level() {
        let args = GlobalArgs {
            debug: true,
            json: None,
        };
        assert_eq!(args.log_level(), Some(LevelFilter::DEBUG));
        assert_eq!(GlobalArgs::default().log_level(), None);
    }

    #[test]
    fn json_flag_behaviour() {
        let automatic = GlobalArgs {
            debug: false,
            json: Some(String::new()),
        };
        assert_eq!(
            automatic.json_log_behaviour(),
            JsonLogBehaviour::SomeAutomaticPath
        );
        let explicit = GlobalArgs {
            debug: false,
            json: Some("log.jsonl".to_owned()),
        };
        assert_eq!(
            explicit.json_log_behaviour(),
            JsonLogBehaviour::Some("log.jsonl".into())
        );
        assert_eq!(
            GlobalArgs::default().json_log_behaviour(),
            JsonLogBehaviour::None
        );
    }
}

use crate::cli::to_args::ToArgs;
use crate::invocation::Classification;
use crate::invocation::InvocationPath;
use crate::logging::Logger;
use arbitrary::Arbitrary;
use clap::Args;
use clap::ValueEnum;
use std::ffi::OsString;
use std::io::Write;

#[derive(ValueEnum, Arbitrary, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum OutputFormat {
    /// One tab separated line per path
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Args, Arbitrary, PartialEq, Debug, Default)]
pub struct ClassifyArgs {
    /// Invocation paths (`argv[0]` style) to classify; defaults to this program's own
    pub paths: Vec<String>,
    /// How to print each classification
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl ClassifyArgs {
    /// Print the launch mode and executable name of every path.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn invoke(self, logger: &Logger) -> eyre::Result<()> {
        let paths: Vec<InvocationPath<'static>> = if self.paths.is_empty() {
            vec![InvocationPath::from_process()]
        } else {
            self.paths.into_iter().map(InvocationPath::from).collect()
        };

        let mut stdout = std::io::stdout().lock();
        for path in &paths {
            let classification = Classification::from(path);
            logger.debug(
                "Classified invocation path",
                &[("path", path), ("mode", &classification.launch_mode)],
            );
            write_classification(&mut stdout, &classification, self.format)?;
        }
        Ok(())
    }
}

fn write_classification(
    out: &mut impl Write,
    classification: &Classification,
    format: OutputFormat,
) -> eyre::Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{classification}")?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, classification)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

impl ToArgs for ClassifyArgs {
    fn to_args(&self) -> Vec<OsString> {
        let mut args = Vec::new();
        if self.format == OutputFormat::Json {
            args.push("--format=json".into());
        }
        if !self.paths.is_empty() {
            args.push("--".into());
            args.extend(self.paths.iter().map(OsString::from));
        }
        args
    }
}

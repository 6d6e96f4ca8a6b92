use crate::invocation::invocation_path::InvocationPath;
use serde::Serialize;
use strum::Display;
use strum::EnumIter;
use strum::EnumString;
use tracing::level_filters::LevelFilter;

/// How the running process was started, derived from its invocation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum LaunchMode {
    /// A regular installed or built binary.
    Build,
    /// Compiled and executed from a transient build cache by an interactive run.
    EphemeralRun,
    /// A test binary. Takes precedence over [`LaunchMode::EphemeralRun`].
    Test,
}

impl LaunchMode {
    #[must_use]
    pub fn detect(path: &InvocationPath<'_>) -> Self {
        if path.is_test_binary() {
            Self::Test
        } else if path.is_ephemeral_run() {
            Self::EphemeralRun
        } else {
            Self::Build
        }
    }

    /// Verbosity used when a logger is built without an explicit level.
    #[must_use]
    pub fn default_level(self) -> LevelFilter {
        match self {
            Self::Build => LevelFilter::WARN,
            Self::EphemeralRun => LevelFilter::INFO,
            Self::Test => LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn is_ephemeral_run(self) -> bool {
        self == Self::EphemeralRun
    }

    #[must_use]
    pub fn is_test_binary(self) -> bool {
        self == Self::Test
    }
}

#[cfg(test)]
mod test {
    use super::LaunchMode;
    use crate::invocation::InvocationPath;
    use strum::IntoEnumIterator;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn detect_and_default_level() {
        let cases = [
            ("exe", LaunchMode::Build, LevelFilter::WARN),
            (
                "/test/tmp/go-build2932332730/b001/go-hcl",
                LaunchMode::EphemeralRun,
                LevelFilter::INFO,
            ),
            ("exe.test", LaunchMode::Test, LevelFilter::DEBUG),
            (
                "/test/tmp/go-build2932332730/b001/__debug_bin",
                LaunchMode::Test,
                LevelFilter::DEBUG,
            ),
        ];
        for (arg0, mode, level) in cases {
            let detected = InvocationPath::from(arg0).launch_mode();
            assert_eq!(detected, mode, "{arg0:?}");
            assert_eq!(detected.default_level(), level, "{arg0:?}");
        }
    }

    #[test]
    fn facets_are_exclusive() {
        for mode in LaunchMode::iter() {
            assert!(!(mode.is_ephemeral_run() && mode.is_test_binary()));
        }
    }

    #[test]
    fn display_parses_back() -> eyre::Result<()> {
        for mode in LaunchMode::iter() {
            let parsed: LaunchMode = mode.to_string().parse()?;
            assert_eq!(parsed, mode);
        }
        assert_eq!(LaunchMode::EphemeralRun.to_string(), "ephemeral-run");
        Ok(())
    }
}

use std::borrow::Cow;
use std::path::Path;
use std::path::PathBuf;

/// What to do with structured JSON logs, as requested by `--json [FILE]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonLogBehaviour {
    None,
    SomeAutomaticPath,
    Some(PathBuf),
}

impl JsonLogBehaviour {
    /// The file JSON logs should go to, generating a timestamped name when
    /// the user asked for JSON without naming a file.
    #[must_use]
    pub fn get_path(&self) -> Option<Cow<'_, Path>> {
        match self {
            Self::None => None,
            Self::SomeAutomaticPath => Some(Cow::Owned(crate::logging::default_json_log_path())),
            Self::Some(path) => Some(Cow::Borrowed(path.as_path())),
        }
    }
}

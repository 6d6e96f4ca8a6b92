use std::ffi::OsString;
use std::path::PathBuf;

/// Convert parsed arguments back into the command line that produces them.
pub trait ToArgs {
    fn to_args(&self) -> Vec<OsString>;
}

/// Something that can be launched as a process.
pub trait Invocable {
    fn path_to_exe(&self) -> PathBuf;
    fn args(&self) -> Vec<OsString>;
}

use crate::invocation::launch_mode::LaunchMode;
use std::borrow::Cow;
use std::fmt::Display;

/// Directory name prefix used by the build tool for its transient build cache.
const EPHEMERAL_BUILD_MARKER: &str = "go-build";
/// Suffixes that identify a binary built to run a test suite.
const TEST_BINARY_SUFFIXES: [&str; 2] = [".test", ".test.exe"];
/// File name produced when a binary is built for an attached debugger.
const DEBUG_BINARY_MARKER: &str = "__debug_bin";
const SEPARATORS: [char; 2] = ['/', '\\'];

/// The zeroth command line argument: how the running executable was invoked.
///
/// Every query is purely syntactic. Both `/` and `\` count as separators on
/// every host so classification is stable across platforms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvocationPath<'a> {
    raw: Cow<'a, str>,
}

impl<'a> InvocationPath<'a> {
    #[must_use]
    pub fn new(raw: impl Into<Cow<'a, str>>) -> Self {
        Self { raw: raw.into() }
    }

    /// Read `argv[0]` of the current process. Missing or non-UTF-8 arguments are
    /// converted lossily, an absent argument becomes the empty path.
    #[must_use]
    pub fn from_process() -> InvocationPath<'static> {
        let raw = std::env::args_os()
            .next()
            .map(|arg| arg.to_string_lossy().into_owned())
            .unwrap_or_default();
        InvocationPath::new(raw)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// True when the binary was staged in a numbered build cache directory by an
    /// interactive build-and-run, e.g. `/tmp/go-build2932332730/b001/app`.
    ///
    /// The marker must start a path segment and be fused to a digit, so
    /// `gogo-build`, `go-build/123` and `\\go-build-server` do not count.
    /// Test binaries transit the same directories and are never ephemeral runs.
    #[must_use]
    pub fn is_ephemeral_run(&self) -> bool {
        if self.is_test_binary() {
            return false;
        }
        let raw = self.as_str();
        raw.match_indices(EPHEMERAL_BUILD_MARKER).any(|(start, _)| {
            let after_separator = raw[..start].ends_with(SEPARATORS);
            let fused_to_digit = raw[start + EPHEMERAL_BUILD_MARKER.len()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit());
            after_separator && fused_to_digit
        })
    }

    /// True when the path names a test binary: it ends in `.test` or
    /// `.test.exe`, or its final segment ends with the debug binary marker.
    #[must_use]
    pub fn is_test_binary(&self) -> bool {
        let raw = self.as_str();
        TEST_BINARY_SUFFIXES
            .iter()
            .any(|suffix| raw.ends_with(suffix))
            || self.final_segment().ends_with(DEBUG_BINARY_MARKER)
    }

    /// The file name without its directory and at most one extension.
    ///
    /// A leading dot is part of the name: `.profile` stays `.profile` and
    /// `.exe.ext` becomes `.exe`.
    #[must_use]
    pub fn executable_name(&self) -> &str {
        let segment = self.final_segment();
        match segment.rfind('.') {
            Some(dot) if segment[..dot].chars().any(|c| c != '.') => &segment[..dot],
            _ => segment,
        }
    }

    #[must_use]
    pub fn launch_mode(&self) -> LaunchMode {
        LaunchMode::detect(self)
    }

    fn final_segment(&self) -> &str {
        let raw = self.as_str();
        raw.rfind(SEPARATORS).map_or(raw, |sep| &raw[sep + 1..])
    }
}

impl Display for InvocationPath<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<'a> From<&'a str> for InvocationPath<'a> {
    fn from(raw: &'a str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for InvocationPath<'static> {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::InvocationPath;
    use proptest::prelude::*;

    #[test]
    fn ephemeral_run() {
        let cases = [
            ("/test/tmp/go-build2932332730/b001/go-hcl", true),
            ("/test/tmp/go-build2932332730/b001/go-hcl.test", false),
            ("/test/tmp/b001/go-hcl", false),
            ("/test/tmp/go-build/2932332730/b001/go-hcl", false),
            ("/test/tmp/go-build/2932332730/b001/go-hcl.test", false),
            ("/bin/exe", false),
            ("./main.go", false),
            (r"c:\Users\Administrator\some.exe", false),
            (
                r"c:\Users\Administrator\AppData\Local\Temp\go-build607140747/b001/go-hcl.exe",
                true,
            ),
            ("/test/gogo-build/someThing", false),
            (r"c:\Temp\thisgo-build\a.exe", false),
            (r"c:\Temp\this\go-build\a.exe", false),
            (r"c:\Temp\this\go-build\a.exe.test", false),
            (r"\\go-build-server\someshare", false),
            ("", false),
        ];
        for (arg0, expected) in cases {
            assert_eq!(
                InvocationPath::from(arg0).is_ephemeral_run(),
                expected,
                "{arg0:?}"
            );
        }
    }

    #[test]
    fn ephemeral_run_later_marker_counts() {
        // the first occurrence is not a cache directory, the second one is
        let path = InvocationPath::from("/home/gogo-build/tmp/go-build42/b001/app");
        assert!(path.is_ephemeral_run());
    }

    #[test]
    fn test_binary() {
        let cases = [
            ("exe.text", false),
            ("exe.test", true),
            ("/test/tmp/go-build2932332730/b001/go-hcl", false),
            ("/test/tmp/go-build2932332730/b001/__debug_bin", true),
            ("/test/tmp/go-build2932332730/b001/go-hcl.test", true),
            ("/test/tmp/b001/go-hcl", false),
            ("/test/tmp/go-build/2932332730/b001/go-hcl", false),
            ("/test/tmp/go-build/2932332730/b001/go-hcl.test", true),
            ("/bin/exe", false),
            ("./main.go", false),
            (r"c:\Users\Administrator\some.exe", false),
            (
                r"c:\Users\Administrator\AppData\Local\Temp\go-build607140747/b001/go-hcl.exe",
                false,
            ),
            (
                r"c:\Users\Administrator\AppData\Local\Temp\go-build607140747/b001/go-hcl.test",
                true,
            ),
            ("/test/gogo-build/someThing", false),
            (r"c:\Temp\thisgo-build\a.exe", false),
            (r"c:\Temp\thisgo-build\a..test.exe", true),
            (r"c:\Temp\this\go-build\a.exe", false),
            (r"\\go-build-server\someshare", false),
            ("/work/__debug_bin/app", false),
            ("", false),
        ];
        for (arg0, expected) in cases {
            assert_eq!(
                InvocationPath::from(arg0).is_test_binary(),
                expected,
                "{arg0:?}"
            );
        }
    }

    #[test]
    fn executable_name() {
        let cases = [
            ("/test/tmp/go-build2932332730/b001/go-hcl.test", "go-hcl"),
            ("/test/tmp/b001/go-hcl.test", "go-hcl"),
            ("/test/tmp/go-build/2932332730/b001/go-hcl.test", "go-hcl"),
            ("/bin/exe", "exe"),
            ("/bin/.exe", ".exe"),
            ("/bin/.exe.ext", ".exe"),
            ("/bin/exe.ext", "exe"),
            ("./main.go", "main"),
            (r"c:\Users\Administrator\some.exe", "some"),
            (r"c:\Users\Administrator\some.test.exe", "some.test"),
            (r"c:\Users\Administrator\.some.exe", ".some"),
            (r"c:\Users\Administrator\.some", ".some"),
            (
                r"c:\Users\Administrator\AppData\Local\Temp\go-build607140747/b001/go-hcl.exe",
                "go-hcl",
            ),
            ("/test/gogo-build/someThing", "someThing"),
            (r"c:\Temp\thisgo-build\a.exe", "a"),
            (r"\\go-build-server\someshare", "someshare"),
            (r"\\server\share", "share"),
            ("./exe", "exe"),
            ("exe.test", "exe"),
            ("plain", "plain"),
            ("/etc.d/plain", "plain"),
            ("/tmp/..", ".."),
            ("///", ""),
            ("", ""),
        ];
        for (arg0, expected) in cases {
            assert_eq!(
                InvocationPath::from(arg0).executable_name(),
                expected,
                "{arg0:?}"
            );
        }
    }

    #[test]
    fn display_round_trips_raw_path() {
        let raw = r"c:\Temp\this\go-build\a.exe";
        assert_eq!(InvocationPath::from(raw).to_string(), raw);
    }

    proptest! {
        #[test]
        fn ephemeral_run_excludes_test_binary(path in ".*") {
            let path = InvocationPath::from(path.as_str());
            prop_assert!(!(path.is_ephemeral_run() && path.is_test_binary()));
        }

        #[test]
        fn no_marker_means_no_ephemeral_run(path in "[^g]*") {
            prop_assert!(!InvocationPath::from(path.as_str()).is_ephemeral_run());
        }

        #[test]
        fn marker_without_separator_is_not_ephemeral(prefix in "[a-z]{1,8}", digits in "[0-9]{1,10}") {
            let raw = format!("{prefix}go-build{digits}/b001/app");
            prop_assert!(!InvocationPath::from(raw.as_str()).is_ephemeral_run());
        }

        #[test]
        fn fused_marker_is_ephemeral(dir in "[a-z]{1,8}", digits in "[0-9]{1,10}", exe in "[a-z]{1,8}") {
            let raw = format!("/{dir}/go-build{digits}/b001/{exe}");
            prop_assert!(InvocationPath::from(raw.as_str()).is_ephemeral_run());
        }

        #[test]
        fn executable_name_is_separator_free_and_stable(path in ".*") {
            let first = InvocationPath::from(path.as_str());
            let name = first.executable_name();
            prop_assert!(!name.contains(['/', '\\']));
            let again = InvocationPath::from(name);
            let _ = again.executable_name();
        }

        #[test]
        fn executable_name_nonempty_when_segment_has_content(dir in "[a-z/]*", name in "[.]{0,2}[a-z]{1,8}(\\.[a-z]{1,3})?") {
            let raw = format!("{dir}/{name}");
            prop_assert!(!InvocationPath::from(raw.as_str()).executable_name().is_empty());
        }
    }
}

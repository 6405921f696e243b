//! Run identifier derived from the process invocation.
//!
//! Test runners usually pass a hashed test or worker id on the command line.
//! The first lowercase alphanumeric token of at least nine characters is taken
//! as the run id and namespaces archived outputs.

use regex::Regex;
use std::ffi::OsString;
use std::sync::LazyLock;

pub const DEFAULT_RUN_ID: &str = "default";

static RUN_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9a-z]{9,}").unwrap());

/// Run id for the current process.
pub fn resolve_run_id() -> String {
    run_id_from_args(&lossy_args(std::env::args_os()))
}

/// Process arguments as text. Invalid UTF-8 is replaced, never rejected.
fn lossy_args(args: impl IntoIterator<Item = OsString>) -> Vec<String> {
    args.into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

/// Run id for an explicit argument list.
///
/// Arguments are joined with `,` before scanning, so a token never spans two
/// arguments.
pub fn run_id_from_args<S: AsRef<str>>(args: &[S]) -> String {
    let joined = args
        .iter()
        .map(|a| a.as_ref())
        .collect::<Vec<_>>()
        .join(",");

    RUN_TOKEN_REGEX
        .find(&joined)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_RUN_ID.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_long_token_wins() {
        let args = ["node", "jest", "--id=a1b2c3d4e5", "f6f6f6f6f6f6"];
        assert_eq!(run_id_from_args(&args), "a1b2c3d4e5");
    }

    #[test]
    fn test_short_tokens_fall_back_to_default() {
        let args = ["bin", "--flag", "abc12345", "X1Y2Z3W4V5"];
        assert_eq!(run_id_from_args(&args), DEFAULT_RUN_ID);
    }

    #[test]
    fn test_uppercase_breaks_token() {
        let args = ["abcdABCDefgh"];
        assert_eq!(run_id_from_args(&args), DEFAULT_RUN_ID);
    }

    #[test]
    fn test_tokens_do_not_span_arguments() {
        let args = ["abcde", "fghij"];
        assert_eq!(run_id_from_args(&args), DEFAULT_RUN_ID);
    }

    #[test]
    fn test_empty_args() {
        let args: [&str; 0] = [];
        assert_eq!(run_id_from_args(&args), DEFAULT_RUN_ID);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_argument_is_tolerated() {
        use std::os::unix::ffi::OsStringExt;

        let args = lossy_args([
            OsString::from_vec(vec![0xff]),
            OsString::from("--seed=k9x8c7v6b5"),
        ]);
        assert_eq!(args[0], "\u{fffd}");
        assert_eq!(run_id_from_args(&args), "k9x8c7v6b5");
    }

    #[test]
    fn test_resolve_run_id_does_not_panic() {
        assert!(!resolve_run_id().is_empty());
    }

    #[test]
    fn test_token_inside_path() {
        let args = ["/tmp/target/debug/deps/recorder-0f3e9a1b2c4d"];
        assert_eq!(run_id_from_args(&args), "0f3e9a1b2c4d");
    }
}

// SPDX-License-Identifier: MIT
//
// Command-line arguments.
//
//   roku [FILE] [--tab-stop N] [--set NAME=VALUE]... [--log-file PATH]
//
// `--tab-stop` is shorthand for `--set tabstop=N`. Assignments are applied
// in order after it, so a later `--set ts=...` wins.

use std::path::PathBuf;

use clap::Parser;
use roku_editor::error::Result;
use roku_editor::options::{OptionName, Options};

/// A small terminal text editor
#[derive(Parser, Debug)]
#[command(name = "roku", version, about = "A small terminal text editor")]
pub struct CliArgs {
    /// File to open (created on first save if it does not exist)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Columns per tab stop
    #[arg(long, value_name = "N")]
    pub tab_stop: Option<usize>,

    /// Set an option, e.g. `--set ts=4` or `--set messagetimeout=3`
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Write logs to this file (filtered by ROKU_LOG, default `warn`)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl CliArgs {
    /// Build editor options from the defaults plus every assignment given.
    ///
    /// # Errors
    ///
    /// The first unknown option name or invalid value.
    pub fn options(&self) -> Result<Options> {
        let mut options = Options::default();
        if let Some(n) = self.tab_stop {
            options.set(&format!("tabstop={n}"))?;
        }
        for assignment in &self.set {
            options.set(assignment)?;
        }
        for name in OptionName::ALL {
            tracing::debug!(option = name.name(), value = %options.get(name), "effective option");
        }
        Ok(options)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("roku").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_arguments() {
        let args = parse(&[]);
        assert!(args.file.is_none());
        assert!(args.log_file.is_none());
        assert_eq!(args.options().unwrap(), Options::default());
    }

    #[test]
    fn file_argument() {
        let args = parse(&["notes.txt"]);
        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
    }

    #[test]
    fn tab_stop_flag() {
        let args = parse(&["--tab-stop", "4"]);
        assert_eq!(args.options().unwrap().tab_stop, 4);
    }

    #[test]
    fn set_is_repeatable_and_applied_in_order() {
        let args = parse(&["--tab-stop", "4", "--set", "ts=2", "--set", "mt=9"]);
        let options = args.options().unwrap();
        assert_eq!(options.tab_stop, 2);
        assert_eq!(options.message_timeout, Duration::from_secs(9));
    }

    #[test]
    fn zero_tab_stop_is_rejected() {
        assert!(parse(&["--tab-stop", "0"]).options().is_err());
    }

    #[test]
    fn unknown_set_is_rejected() {
        let err = parse(&["--set", "colour=red"]).options().unwrap_err();
        assert_eq!(err.to_string(), "unknown option: colour");
    }

    #[test]
    fn log_file_flag() {
        let args = parse(&["--log-file", "/tmp/roku.log", "a.txt"]);
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/roku.log")));
        assert_eq!(args.file, Some(PathBuf::from("a.txt")));
    }

    #[test]
    fn non_numeric_tab_stop_fails_to_parse() {
        assert!(CliArgs::try_parse_from(["roku", "--tab-stop", "wide"]).is_err());
    }
}

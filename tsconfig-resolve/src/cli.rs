//! Command-line interface definitions for `tsconfig-resolve`.

use clap::{Parser, ValueEnum};
use tsconfig_resolver::{DEFAULT_CONFIG_FILE_NAME, ResolveOptions};

/// Output formats supported by `tsconfig-resolve`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

impl OutputFormat {
    /// Returns the CLI-friendly string for this output format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Parsed CLI arguments for `tsconfig-resolve`.
#[derive(Debug, Parser)]
#[command(name = "tsconfig-resolve")]
#[command(about = "Find a tsconfig.json and print its resolved configuration")]
#[command(version)]
pub struct Args {
    /// Configuration file to look for, relative to `--cwd` or absolute.
    #[arg(value_name = "PROJECT", default_value = DEFAULT_CONFIG_FILE_NAME)]
    pub project: String,
    /// Directory the search starts from (defaults to the working directory).
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<String>,
    /// Highest directory the search may visit.
    #[arg(long, value_name = "DIR", env = "TSCONFIG_RESOLVE_STOP_DIR")]
    pub stop_dir: Option<String>,
    /// Fail instead of climbing when the start directory is missing.
    #[arg(long = "require-dir")]
    pub should_require_dir: bool,
    /// Print the configuration path without resolving it.
    #[arg(long = "find-only")]
    pub is_find_only: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Raise log verbosity (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Library options described by these arguments.
    #[must_use]
    pub fn resolve_options(&self) -> ResolveOptions {
        let mut options = ResolveOptions::new()
            .with_file_path(self.project.as_str())
            .require_start_directory(self.should_require_dir);
        if let Some(cwd) = &self.cwd {
            options = options.with_start_directory(cwd.as_str());
        }
        if let Some(stop) = &self.stop_dir {
            options = options.with_stop_directory(stop.as_str());
        }
        options
    }

    /// Default log filter for the requested verbosity.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("tsconfig-resolve").chain(args.iter().copied()))
    }

    #[rstest]
    fn defaults_search_for_tsconfig_json() -> Result<(), clap::Error> {
        let args = parse(&[])?;
        assert_eq!(args.project, "tsconfig.json");
        assert_eq!(args.format, OutputFormat::Text);
        let options = args.resolve_options();
        assert_eq!(options.search().file_path(), "tsconfig.json");
        assert!(!options.search().start_directory_should_exist());
        Ok(())
    }

    #[rstest]
    fn flags_map_onto_search_options() -> Result<(), clap::Error> {
        let args = parse(&[
            "tsconfig.build.json",
            "--cwd",
            "packages/app",
            "--stop-dir",
            "packages",
            "--require-dir",
        ])?;
        let options = args.resolve_options();
        let search = options.search();
        assert_eq!(search.file_path(), "tsconfig.build.json");
        assert_eq!(search.start_directory(), Some("packages/app"));
        assert_eq!(search.stop_directory(), Some("packages"));
        assert!(search.start_directory_should_exist());
        Ok(())
    }

    #[rstest]
    #[case(&[], "warn")]
    #[case(&["-v"], "info")]
    #[case(&["-vv"], "debug")]
    #[case(&["-vvvv"], "trace")]
    fn verbosity_raises_the_log_level(
        #[case] flags: &[&str],
        #[case] expected: &str,
    ) -> Result<(), clap::Error> {
        assert_eq!(parse(flags)?.log_level(), expected);
        Ok(())
    }

    #[rstest]
    fn unknown_formats_are_rejected() {
        let err = parse(&["--format", "yaml"]).err();
        assert!(err.is_some(), "yaml is not a supported format");
    }
}

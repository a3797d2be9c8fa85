//! Runtime configuration built once from CLI arguments.

use crate::cli::Cli;
use crate::constants::{
    self, BREW_PROGRAM, DEFAULT_BRANCH, GIT_PROGRAM, HOMEBREW_CORE_GIT_DIR,
    NOTIFIER_PROGRAM, PACKAGE_PATH_PATTERN,
};
use crate::lookback::Lookback;
use crate::process::{self, CommandLogger};
use std::path::PathBuf;
use std::time::Duration;

/// Everything a run needs, passed by reference to each step.
#[derive(Debug, Clone)]
pub struct Config {
    /// Controls the verbosity level of CLI output.
    pub verbosity: Verbosity,
    pub since: Lookback,
    pub notify: bool,
    pub git_dir: PathBuf,
    pub branch: String,
    pub output_dir: PathBuf,
    /// `None` renders with the embedded template.
    pub template_dir: Option<PathBuf>,
    pub package_pattern: String,
    pub git_program: PathBuf,
    pub brew_program: PathBuf,
    pub notifier_program: PathBuf,
    pub timeout: Duration,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let verbosity = if cli.debug {
            Verbosity::Verbose
        } else if cli.quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        };

        Self {
            verbosity,
            since: cli.since,
            notify: !cli.no_notify,
            git_dir: cli.git_dir,
            branch: cli.branch,
            output_dir: cli.output_dir.unwrap_or_else(std::env::temp_dir),
            template_dir: cli.template_dir,
            package_pattern: cli
                .pattern
                .unwrap_or_else(|| PACKAGE_PATH_PATTERN.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Returns the command logger matching the verbosity settings.
    #[must_use]
    pub fn command_logger(&self) -> CommandLogger {
        if self.is_verbose() {
            process::verbose_logger
        } else {
            process::no_op_logger
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            since: Lookback::default(),
            notify: true,
            git_dir: PathBuf::from(HOMEBREW_CORE_GIT_DIR),
            branch: DEFAULT_BRANCH.to_string(),
            output_dir: std::env::temp_dir(),
            template_dir: None,
            package_pattern: PACKAGE_PATH_PATTERN.to_string(),
            git_program: PathBuf::from(GIT_PROGRAM),
            brew_program: PathBuf::from(BREW_PROGRAM),
            notifier_program: PathBuf::from(NOTIFIER_PROGRAM),
            timeout: constants::command_timeout(),
        }
    }
}

/// Verbosity level for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_verbosity_drives_predicates_and_logger() {
        let cases = [
            (Verbosity::Quiet, true, false, process::no_op_logger as CommandLogger),
            (Verbosity::Normal, false, false, process::no_op_logger as CommandLogger),
            (Verbosity::Verbose, false, true, process::verbose_logger as CommandLogger),
        ];
        for (verbosity, quiet, verbose, logger) in cases {
            let config = Config {
                verbosity,
                ..Config::default()
            };
            assert_eq!(config.is_quiet(), quiet, "{:?}", verbosity);
            assert_eq!(config.is_verbose(), verbose, "{:?}", verbosity);
            assert!(std::ptr::fn_addr_eq(config.command_logger(), logger));
        }
    }

    #[test]
    fn test_from_cli_maps_flags() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "show-urls-for-recent-homebrews",
            "--since",
            "3h",
            "--no-notify",
            "--debug",
            "--output-dir",
            "/var/reports",
        ])?;
        let config = Config::from_cli(cli);

        assert_eq!(config.since.seconds(), 10_800);
        assert!(!config.notify);
        assert!(config.is_verbose());
        assert_eq!(config.output_dir, PathBuf::from("/var/reports"));
        assert_eq!(config.package_pattern, PACKAGE_PATH_PATTERN);
        Ok(())
    }

    #[test]
    fn test_from_cli_quiet_and_default_output_dir() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["show-urls-for-recent-homebrews", "-q"])?;
        let config = Config::from_cli(cli);

        assert!(config.is_quiet());
        assert!(config.notify);
        assert_eq!(config.output_dir, std::env::temp_dir());
        Ok(())
    }
}

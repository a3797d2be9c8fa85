//! Command-line arguments.

use crate::constants::{DEFAULT_BRANCH, DEFAULT_SINCE, HOMEBREW_CORE_GIT_DIR};
use crate::lookback::Lookback;
use clap::Parser;
use std::path::PathBuf;

/// Show homepages of recently updated Homebrew formulae.
#[derive(Debug, Parser)]
#[command(name = "show-urls-for-recent-homebrews", version, about)]
pub struct Cli {
    /// Show changes since this long ago, e.g. `2d` for the last two days (units: s, m, h, d, w).
    #[arg(short, long, default_value = DEFAULT_SINCE)]
    pub since: Lookback,

    /// Do not send a desktop notification.
    #[arg(short, long)]
    pub no_notify: bool,

    /// Print every step and external command.
    #[arg(long, conflicts_with = "quiet")]
    pub debug: bool,

    /// Only print errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Git directory of the formula repository.
    #[arg(long, default_value = HOMEBREW_CORE_GIT_DIR)]
    pub git_dir: PathBuf,

    /// Branch whose tip the change set is diffed against.
    #[arg(long, default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Directory reports are written to (defaults to the system temp dir).
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Directory holding a custom `page.tmpl`.
    #[arg(long)]
    pub template_dir: Option<PathBuf>,

    /// Regular expression selecting package paths; group 1 is the package name.
    #[arg(long)]
    pub pattern: Option<String>,
}

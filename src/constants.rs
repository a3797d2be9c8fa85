//! Application-wide constants.
//!
//! Centralized defaults so paths, patterns and limits are not scattered
//! through the pipeline code.

use std::time::Duration;

/// Default timeout for any single external command (in seconds).
const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 120;

/// Longest accepted command timeout: one day.
const MAX_COMMAND_TIMEOUT_SECS: u64 = 86_400;

/// Environment variable overriding the command timeout.
pub const TIMEOUT_ENV_VAR: &str = "RECENT_BREWS_TIMEOUT";

/// Returns the external command timeout from RECENT_BREWS_TIMEOUT.
///
/// Example: `RECENT_BREWS_TIMEOUT=30 show-urls-for-recent-homebrews`
pub fn command_timeout() -> Duration {
    parse_timeout(std::env::var(TIMEOUT_ENV_VAR).ok().as_deref())
}

/// Seconds from `value`, clamped to `1..=MAX_COMMAND_TIMEOUT_SECS`.
/// Unset or unparsable values give the 120 second default.
pub fn parse_timeout(value: Option<&str>) -> Duration {
    let secs = match value.map(|s| s.trim().parse::<u64>()) {
        Some(Ok(secs)) => secs.clamp(1, MAX_COMMAND_TIMEOUT_SECS),
        _ => DEFAULT_COMMAND_TIMEOUT_SECS,
    };
    Duration::from_secs(secs)
}

/// How often a running child process is polled for exit.
pub const PROCESS_POLL_MS: u64 = 20;

/// Progress spinner tick interval in milliseconds.
pub const PROGRESS_TICK_MS: u64 = 80;

/// Git directory of the homebrew-core tap.
pub const HOMEBREW_CORE_GIT_DIR: &str = "/usr/local/Homebrew/Library/Taps/homebrew/homebrew-core/.git";

/// Branch the change set is diffed against.
pub const DEFAULT_BRANCH: &str = "master";

pub const GIT_PROGRAM: &str = "git";
pub const BREW_PROGRAM: &str = "brew";
pub const NOTIFIER_PROGRAM: &str = "terminal-notifier";

/// Prepended to `PATH` for git invocations.
pub const SEARCH_PATH_PREFIX: &str = "/usr/local/bin";

/// Lookback window used when `--since` is not given.
pub const DEFAULT_SINCE: &str = "1d";
pub const DEFAULT_SINCE_SECS: u64 = 86_400;

/// Matches formula and alias paths, capturing the package name.
///
/// The prefix must start the path or follow a `/`, and sharded layouts
/// such as `Formula/f/foo.rb` are accepted.
pub const PACKAGE_PATH_PATTERN: &str = r"(?i)(?:^|/)(?:Formula|Aliases)/(?:[^/]+/)*?([\w-]+)(?:[^\w/-][^/]*)?$";

/// Template file looked up in a `--template-dir`.
pub const TEMPLATE_FILE: &str = "page.tmpl";

/// Name of the variable holding the package records inside the template.
pub const TEMPLATE_VARIABLE: &str = "my_list";

/// File name prefix shared by every report and the stable alias.
pub const REPORT_PREFIX: &str = "show-urls-for-recent-homebrews";

/// `strftime` format of the report timestamp, e.g. `Thursday-930AM`.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%A-%-I%M%p";

pub const NOTIFICATION_TITLE: &str = "Homebrew";
pub const NOTIFICATION_MESSAGE: &str = "Homebrew updates";

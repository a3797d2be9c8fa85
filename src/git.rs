//! Git command wrappers.
//!
//! Commands run against an explicit `--git-dir`, with `HOME` cleared so the
//! user's `.gitconfig` cannot change the output format.

use crate::config::Config;
use crate::constants::SEARCH_PATH_PREFIX;
use crate::lookback::Lookback;
use crate::process::{CommandLogger, Invocation};
use anyhow::Context;

fn git_invocation(config: &Config, args: &[&str]) -> Invocation {
    let inherited_path = std::env::var_os("PATH").unwrap_or_default();
    let mut search_path = std::ffi::OsString::from(SEARCH_PATH_PREFIX);
    if !inherited_path.is_empty() {
        search_path.push(":");
        search_path.push(inherited_path);
    }

    let mut git_dir = std::ffi::OsString::from("--git-dir=");
    git_dir.push(config.git_dir.as_os_str());

    Invocation::new(&config.git_program)
        .arg(git_dir)
        .args(args)
        .env("HOME", "")
        .env("PATH", search_path)
}

pub fn run_git(config: &Config, args: &[&str], logger: CommandLogger) -> anyhow::Result<String> {
    git_invocation(config, args).run(config.timeout, logger)
}

fn lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_ref(name: &str) -> anyhow::Result<()> {
    if name.is_empty()
        || name.starts_with('-')
        || name.contains("..")
        || name.chars().any(|c| c.is_whitespace() || c.is_control())
    {
        anyhow::bail!("Invalid git ref: {:?}", name);
    }
    Ok(())
}

/// Short hashes of commits within the window, newest first.
pub fn recent_commits(
    config: &Config,
    since: &Lookback,
    logger: CommandLogger,
) -> anyhow::Result<Vec<String>> {
    let since_arg = format!("--since={}.seconds.ago", since.seconds());
    run_git(config, &["log", "--format=%h", &since_arg], logger)
        .map(|output| lines(&output))
        .with_context(|| format!("Failed to list commits since {}", since))
}

/// Paths added or modified between `base` and the tip of `branch`.
pub fn changed_paths(
    config: &Config,
    base: &str,
    branch: &str,
    logger: CommandLogger,
) -> anyhow::Result<Vec<String>> {
    validate_ref(base)?;
    validate_ref(branch)?;
    let range = format!("{}..{}", base, branch);
    run_git(
        config,
        &["diff", "--diff-filter=d", "--name-only", &range],
        logger,
    )
    .map(|output| lines(&output))
    .with_context(|| format!("Failed to diff {}", range))
}

//! Homebrew metadata lookup.

use crate::config::Config;
use crate::process::{CommandLogger, Invocation};
use anyhow::Context;
use serde_json::Value;

/// Runs `brew info --json` once for all `names` and returns the records as-is.
///
/// With no names there is nothing to ask for, so brew is not invoked and the
/// result is empty.
pub fn package_info(
    config: &Config,
    names: &[String],
    logger: CommandLogger,
) -> anyhow::Result<Vec<Value>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let stdout = Invocation::new(&config.brew_program)
        .args(["info", "--json"])
        .args(names)
        .run(config.timeout, logger)
        .context("Failed to fetch package info from brew")?;

    parse_info(&stdout)
}

fn parse_info(json: &str) -> anyhow::Result<Vec<Value>> {
    serde_json::from_str(json).context("brew info did not return a JSON array")
}

//! Writing reports and swapping the stable alias.
//!
//! Each run writes a fresh timestamped file. The alias
//! `show-urls-for-recent-homebrews.html` is replaced by renaming a temporary
//! symlink over it, so it always resolves to a complete report.

use crate::constants::{REPORT_PREFIX, REPORT_TIMESTAMP_FORMAT};
use anyhow::Context;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::symlink;
#[cfg(windows)]
use std::os::windows::fs::symlink_file as symlink;

/// Where a published report ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedReport {
    pub path: PathBuf,
    pub alias: PathBuf,
}

/// Timestamped report path, e.g. `show-urls-for-recent-homebrews-Thursday-930AM.html`.
pub fn report_path<Tz>(dir: &Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dir.join(format!(
        "{}-{}.html",
        REPORT_PREFIX,
        now.format(REPORT_TIMESTAMP_FORMAT)
    ))
}

#[must_use]
pub fn alias_path(dir: &Path) -> PathBuf {
    dir.join(format!("{}.html", REPORT_PREFIX))
}

pub fn write_report(path: &Path, html: &str) -> anyhow::Result<()> {
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

/// Points `alias` at `target` without a window where `alias` is missing.
///
/// The link stores an absolute target; a relative one would resolve from the
/// link's own directory instead of the working directory.
pub fn update_symlink(target: &Path, alias: &Path) -> anyhow::Result<()> {
    let target = std::path::absolute(target)
        .with_context(|| format!("Failed to resolve report path {}", target.display()))?;
    let mut tmp = target.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    // Leftover from an interrupted run.
    if tmp.symlink_metadata().is_ok() {
        std::fs::remove_file(&tmp)
            .with_context(|| format!("Failed to remove stale link {}", tmp.display()))?;
    }

    symlink(&target, &tmp)
        .with_context(|| format!("Failed to create symlink {}", tmp.display()))?;
    std::fs::rename(&tmp, alias).with_context(|| {
        format!(
            "Failed to move symlink {} over {}",
            tmp.display(),
            alias.display()
        )
    })
}

/// Writes `html` to a timestamped file in `dir` and repoints the alias at it.
/// The returned paths are absolute.
pub fn publish<Tz>(dir: &Path, html: &str, now: &DateTime<Tz>) -> anyhow::Result<PublishedReport>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let dir = std::path::absolute(dir)
        .with_context(|| format!("Failed to resolve output directory {}", dir.display()))?;
    let path = report_path(&dir, now);
    let alias = alias_path(&dir);
    write_report(&path, html)?;
    update_symlink(&path, &alias)?;
    Ok(PublishedReport { path, alias })
}

// Pipeline steps, callbacks, outcome types

use crate::config::Config;
use crate::packages::PackageFilter;
use crate::publish::{self, PublishedReport};
use crate::report::Renderer;
use crate::{brew, git, notify};
use chrono::{DateTime, Local, TimeZone};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    ListingCommits,
    DiffingChanges { base: String },
    FetchingMetadata { packages: usize },
    Rendering,
    Publishing,
    Notifying,
    Completed,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::ListingCommits => write!(f, "Listing recent commits"),
            Step::DiffingChanges { base } => write!(f, "Diffing changes since {}", base),
            Step::FetchingMetadata { packages } => {
                write!(f, "Fetching metadata for {} packages", packages)
            }
            Step::Rendering => write!(f, "Rendering report"),
            Step::Publishing => write!(f, "Writing report"),
            Step::Notifying => write!(f, "Sending notification"),
            Step::Completed => write!(f, "Completed"),
        }
    }
}

/// Hooks for presenting progress while the pipeline runs.
pub trait PipelineCallbacks {
    fn on_step(&self, step: &Step);

    fn on_commits(&self, _commits: &[String]) {}

    fn on_packages(&self, _names: &[String]) {}
}

#[derive(Debug)]
pub struct RunSummary {
    pub commits: usize,
    pub packages: Vec<String>,
    pub report: PublishedReport,
    /// `None` when notifications are disabled.
    pub notified: Option<bool>,
}

#[derive(Debug)]
pub enum Outcome {
    /// Nothing changed inside the window; no report was written.
    NoRecentCommits,
    Published(RunSummary),
}

fn at_step<T>(step: &Step, result: anyhow::Result<T>) -> anyhow::Result<T> {
    result.map_err(|e| e.context(format!("{} failed", step)))
}

pub fn run<C>(config: &Config, callbacks: &C) -> anyhow::Result<Outcome>
where
    C: PipelineCallbacks + ?Sized,
{
    run_at(config, callbacks, &Local::now())
}

/// Runs the pipeline, stamping the report with `now`.
pub fn run_at<C, Tz>(config: &Config, callbacks: &C, now: &DateTime<Tz>) -> anyhow::Result<Outcome>
where
    C: PipelineCallbacks + ?Sized,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let logger = config.command_logger();
    let filter = PackageFilter::new(&config.package_pattern)?;

    let step = Step::ListingCommits;
    callbacks.on_step(&step);
    let commits = at_step(&step, git::recent_commits(config, &config.since, logger))?;
    callbacks.on_commits(&commits);

    let Some(oldest) = commits.last() else {
        return Ok(Outcome::NoRecentCommits);
    };

    let step = Step::DiffingChanges {
        base: oldest.clone(),
    };
    callbacks.on_step(&step);
    let paths = at_step(
        &step,
        git::changed_paths(config, oldest, &config.branch, logger),
    )?;
    let packages = filter.package_names(&paths);
    callbacks.on_packages(&packages);

    let step = Step::FetchingMetadata {
        packages: packages.len(),
    };
    callbacks.on_step(&step);
    let records = at_step(&step, brew::package_info(config, &packages, logger))?;

    let step = Step::Rendering;
    callbacks.on_step(&step);
    let html = at_step(
        &step,
        Renderer::for_dir(config.template_dir.as_deref()).and_then(|r| r.render(&records)),
    )?;

    let step = Step::Publishing;
    callbacks.on_step(&step);
    let report = at_step(&step, publish::publish(&config.output_dir, &html, now))?;

    let notified = if config.notify {
        let step = Step::Notifying;
        callbacks.on_step(&step);
        Some(at_step(&step, notify::send(config, &report.path, logger))?)
    } else {
        None
    };

    callbacks.on_step(&Step::Completed);

    Ok(Outcome::Published(RunSummary {
        commits: commits.len(),
        packages,
        report,
        notified,
    }))
}

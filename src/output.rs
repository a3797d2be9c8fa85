//! Spinner, colored step output, and run summary.
//!
//! Normal mode shows a single spinner; verbose mode prints each step and the
//! data it produced instead; quiet mode prints nothing but errors.

use crate::config::Config;
use crate::constants::PROGRESS_TICK_MS;
use crate::lookback::Lookback;
use crate::pipeline::{Outcome, PipelineCallbacks, RunSummary, Step};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Callbacks that show nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpCallbacks;

impl PipelineCallbacks for NoOpCallbacks {
    fn on_step(&self, _step: &Step) {}
}

/// Progress display for one run.
/// Uses `Option` so no spinner is allocated in quiet or verbose mode.
pub struct RunProgress {
    spinner: Option<ProgressBar>,
    config: Config,
}

impl RunProgress {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let spinner = if config.is_quiet() || config.is_verbose() {
            None
        } else {
            let spinner = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
            {
                spinner.set_style(style);
            }
            spinner.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
            Some(spinner)
        };

        Self {
            spinner,
            config: config.clone(),
        }
    }

    pub fn finish(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }
}

impl PipelineCallbacks for RunProgress {
    fn on_step(&self, step: &Step) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format!("{}...", step));
        }
        print_step(&self.config, step);
    }

    fn on_commits(&self, commits: &[String]) {
        if !self.config.is_verbose() {
            return;
        }
        eprintln!(
            "  {} {}",
            format!("{} recent commits:", commits.len()).dimmed(),
            commits.join(" ")
        );
    }

    fn on_packages(&self, names: &[String]) {
        if !self.config.is_verbose() {
            return;
        }
        eprintln!(
            "  {} {}",
            format!("{} changed packages:", names.len()).dimmed(),
            names.join(" ")
        );
    }
}

/// Prints a step progress message in verbose mode.
pub fn print_step(config: &Config, step: &Step) {
    if !config.is_verbose() {
        return;
    }
    eprintln!("{}", format!("{}...", step).white().bold());
}

pub fn print_outcome(outcome: &Outcome, config: &Config) {
    if config.is_quiet() {
        return;
    }
    match outcome {
        Outcome::NoRecentCommits => print_no_commits(&config.since),
        Outcome::Published(summary) => print_summary(summary),
    }
}

fn print_no_commits(since: &Lookback) {
    println!(
        "{}",
        format!("No commits in the last {}", since).yellow().bold()
    )
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{} {} from {}",
        "Changed:".cyan(),
        format_count(summary.packages.len(), "package"),
        format_count(summary.commits, "commit"),
    );
    println!(
        "{} {}",
        "Report:".cyan(),
        summary.report.path.display().to_string().white().bold()
    );
    println!(
        "{} {}",
        "Latest:".cyan(),
        summary.report.alias.display().to_string().dimmed()
    );
    match summary.notified {
        Some(true) => println!("{} notification sent", "✓".green()),
        Some(false) => println!("{} notifier exited with an error", "✗".red()),
        None => {}
    }
}

fn format_count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

//! Recently updated Homebrew formulae report.
//!
//! This crate builds an HTML page of packages touched in a formula
//! repository within a lookback window by:
//! - Listing recent commits with git
//! - Diffing the oldest of them against the branch tip
//! - Picking formula and alias paths out of the diff
//! - Fetching `brew info --json` for those packages
//! - Rendering and publishing the page, then notifying the desktop

pub mod brew;
pub mod cli;
pub mod config;
pub mod constants;
pub mod git;
pub mod lookback;
pub mod notify;
pub mod output;
pub mod packages;
pub mod pipeline;
pub mod process;
pub mod publish;
pub mod report;

//! Test infrastructure for recent-brews integration tests.

#![allow(dead_code)]

use anyhow::Result;
use recent_brews::config::{Config, Verbosity};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tempfile::TempDir;

/// Committer date far outside any lookback window used in tests.
const OLD_DATE: &str = "2000-01-01T00:00:00Z";

fn git(path: &Path, args: &[&str], date: Option<&str>) -> Result<String> {
    let mut command = Command::new("git");
    command
        .current_dir(path)
        .args(["-c", "commit.gpgsign=false"])
        .args(args);
    if let Some(date) = date {
        command
            .env("GIT_AUTHOR_DATE", date)
            .env("GIT_COMMITTER_DATE", date);
    }
    let output = command.output()?;
    if !output.status.success() {
        anyhow::bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// A temporary formula repository.
/// Starts with one commit dated in 2000 holding `Formula/old.rb`.
pub struct TestRepo {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl TestRepo {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();

        git(&path, &["init", "-b", "master"], None)?;
        git(&path, &["config", "user.email", "test@example.com"], None)?;
        git(&path, &["config", "user.name", "Test User"], None)?;

        let repo = Self {
            _temp_dir: temp_dir,
            path,
        };
        repo.write("README.md", "# Formulae\n")?;
        repo.write("Formula/old.rb", "class Old < Formula\nend\n")?;
        repo.commit_dated("Initial commit", Some(OLD_DATE))?;
        Ok(repo)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_dir(&self) -> PathBuf {
        self.path.join(".git")
    }

    pub fn write(&self, relative: &str, contents: &str) -> Result<()> {
        let file = self.path.join(relative);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(file, contents)?;
        Ok(())
    }

    pub fn remove(&self, relative: &str) -> Result<()> {
        std::fs::remove_file(self.path.join(relative))?;
        Ok(())
    }

    /// Commits everything in the work tree with the current date.
    pub fn commit(&self, message: &str) -> Result<()> {
        self.commit_dated(message, None)
    }

    fn commit_dated(&self, message: &str, date: Option<&str>) -> Result<()> {
        git(&self.path, &["add", "-A"], None)?;
        git(&self.path, &["commit", "-m", message], date)?;
        Ok(())
    }

    /// Commits writing each `(path, contents)` pair.
    pub fn commit_files(&self, files: &[(&str, &str)], message: &str) -> Result<()> {
        for (relative, contents) in files {
            self.write(relative, contents)?;
        }
        self.commit(message)
    }

    pub fn short_head(&self, rev: &str) -> Result<String> {
        Ok(git(&self.path, &["rev-parse", "--short", rev], None)?
            .trim()
            .to_string())
    }
}

/// Shell-script stand-ins for `brew` and `terminal-notifier` that record
/// their arguments.
pub struct FakeTools {
    dir: TempDir,
    pub brew: PathBuf,
    pub notifier: PathBuf,
}

impl FakeTools {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let brew_log = dir.path().join("brew.log");
        let notifier_log = dir.path().join("notifier.log");

        let brew = dir.path().join("brew");
        write_script(
            &brew,
            &format!(
                r#"printf '%s\n' "$*" >> '{log}'
shift 2
printf '['
sep=''
for name in "$@"; do
  printf '%s{{"name":"%s","desc":"%s formula","homepage":"https://example.com/%s","versions":{{"stable":"1.0"}}}}' "$sep" "$name" "$name" "$name"
  sep=','
done
printf ']\n'
"#,
                log = brew_log.display()
            ),
        )?;

        let notifier = dir.path().join("terminal-notifier");
        write_script(
            &notifier,
            &format!(
                r#"printf '%s\n' "$*" >> '{log}'
"#,
                log = notifier_log.display()
            ),
        )?;

        Ok(Self {
            dir,
            brew,
            notifier,
        })
    }

    /// Replaces the brew stand-in with one printing `output`.
    pub fn brew_prints(&self, output: &str) -> Result<()> {
        write_script(&self.brew, &format!("printf '%s' '{}'\n", output))
    }

    pub fn brew_calls(&self) -> Vec<String> {
        read_lines(&self.dir.path().join("brew.log"))
    }

    pub fn notifier_calls(&self) -> Vec<String> {
        read_lines(&self.dir.path().join("notifier.log"))
    }
}

fn write_script(path: &Path, body: &str) -> Result<()> {
    std::fs::write(path, format!("#!/bin/sh\n{}", body))?;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    Ok(())
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|s| s.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Config wired to `repo`, the fake tools, and `output_dir`.
pub fn test_config(repo: &TestRepo, tools: &FakeTools, output_dir: &Path) -> Config {
    Config {
        verbosity: Verbosity::Quiet,
        git_dir: repo.git_dir(),
        output_dir: output_dir.to_path_buf(),
        brew_program: tools.brew.clone(),
        notifier_program: tools.notifier.clone(),
        timeout: Duration::from_secs(30),
        ..Config::default()
    }
}

pub fn files_in(dir: &Path) -> Result<Vec<String>> {
    let mut names = std::fs::read_dir(dir)?
        .map(|entry| -> Result<String> { Ok(entry?.file_name().to_string_lossy().into_owned()) })
        .collect::<Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

//! System git backend - zero dependencies, maximum portability
//!
//! Uses git plumbing commands for all operations:
//! - Changed-file discovery (diff --name-status over a merge-base range)
//! - Base branch detection (remote-tracking refs, then the remote HEAD)
//! - Per-file diff text for document nodes
//! - Safe subprocess execution (isolated environment)
//!
//! Nothing here touches the network: refs are read as they exist locally,
//! and fetching is left to the caller's own workflow.

use crate::core::error::{GitError, ResultExt, RippleError, RippleResult};
use crate::core::vcs::{ChangeKind, ChangedFile};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Remote-tracking refs tried, in order, when no base is given.
const BASE_BRANCH_CANDIDATES: &[&str] =
  &["origin/main", "origin/master", "origin/develop", "origin/dev"];

/// Git backend using system git (zero crate dependencies)
pub struct SystemGit {
  /// Repository working directory
  pub(crate) repo_path: PathBuf,

  /// Working tree root
  pub(crate) work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> RippleResult<Self> {
    // Get repo metadata in one subprocess call
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(RippleError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(RippleError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Root of the working tree this repository was opened from
  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Get current branch name
  pub fn current_branch(&self) -> RippleResult<String> {
    let output = self
      .git_cmd()
      .args(["rev-parse", "--abbrev-ref", "HEAD"])
      .output()
      .context("Failed to get current branch")?;

    if !output.status.success() {
      return Ok("HEAD".to_string()); // Detached HEAD
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Files changed on `head` since it diverged from `base`.
  ///
  /// Uses the merge-base range (`base...head`), so commits that only exist
  /// on the base side do not show up as changes. Rename and copy entries
  /// keep their new path.
  pub fn changed_files_between(&self, base: &str, head: &str) -> RippleResult<Vec<ChangedFile>> {
    let range = format!("{}...{}", base, head);
    let output = self
      .git_cmd()
      .args(["diff", "--name-status", &range])
      .output()
      .context("Failed to execute git diff")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("unknown revision") || stderr.contains("bad revision") {
        return Err(RippleError::with_help(
          format!("Unknown revision in range {}", range),
          "Check that both refs exist: git rev-parse <ref>",
        ));
      }
      return Err(RippleError::Git(GitError::CommandFailed {
        command: format!("git diff --name-status {}", range),
        stderr: stderr.to_string(),
      }));
    }

    Ok(parse_name_status(&String::from_utf8_lossy(&output.stdout)))
  }

  /// Pick the base ref to compare against when none was given.
  ///
  /// Tries the conventional remote-tracking branches, then the remote's
  /// recorded default branch. Always returns something usable as a ref
  /// name; whether it resolves is decided by the diff itself.
  pub fn detect_base_branch(&self) -> String {
    for candidate in BASE_BRANCH_CANDIDATES {
      if self.ref_exists(candidate) {
        return candidate.to_string();
      }
    }

    if let Some(head) = self.remote_head() {
      return head;
    }

    "master".to_string()
  }

  /// Unified diff for one file across the range. Best effort: any failure
  /// degrades to `None`.
  pub fn diff_file(&self, base: &str, head: &str, path: &str) -> Option<String> {
    let range = format!("{}...{}", base, head);
    let output = self
      .git_cmd()
      .args(["diff", &range, "--", path])
      .output()
      .ok()?;

    if !output.status.success() {
      return None;
    }

    let diff = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if diff.is_empty() { None } else { Some(diff) }
  }

  fn ref_exists(&self, reference: &str) -> bool {
    self
      .git_cmd()
      .args(["rev-parse", "--verify", "--quiet", reference])
      .output()
      .map(|output| output.status.success())
      .unwrap_or(false)
  }

  /// The remote's default branch as `origin/<name>`, when recorded.
  fn remote_head(&self) -> Option<String> {
    let output = self
      .git_cmd()
      .args(["symbolic-ref", "refs/remotes/origin/HEAD"])
      .output()
      .ok()?;

    if !output.status.success() {
      return None;
    }

    let full = String::from_utf8_lossy(&output.stdout).trim().to_string();
    full.strip_prefix("refs/remotes/").map(|name| name.to_string())
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    // Set working directory
    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    // Force safe behavior (override user config)
    cmd.arg("-c").arg("protocol.version=2");
    cmd.arg("-c").arg("advice.detachedHead=false");
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII

    cmd
  }
}

/// Parse `git diff --name-status` output into changed-file records.
fn parse_name_status(output: &str) -> Vec<ChangedFile> {
  let mut files = Vec::new();

  for line in output.lines() {
    let mut parts = line.split('\t');
    let Some(status) = parts.next() else {
      continue;
    };
    if status.is_empty() {
      continue;
    }

    // Rename/copy lines carry old path then new path; keep the new one.
    let Some(path) = parts.next_back() else {
      continue;
    };
    if path.is_empty() {
      continue;
    }

    files.push(ChangedFile::new(path, ChangeKind::from_status(status)));
  }

  files
}

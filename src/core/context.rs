//! Unified repository context - build once, pass everywhere
//!
//! # Design
//!
//! RepoContext opens the repository and loads ripple.toml once in main.rs,
//! then passes by reference to all commands. It also owns the merge of
//! CLI flags over config defaults, so commands never consult ripple.toml
//! directly.

use crate::core::config::RippleConfig;
use crate::core::error::RippleResult;
use crate::core::vcs::SystemGit;
use crate::graph::affected::AnalysisOptions;
use std::path::{Path, PathBuf};

/// Shared repository-level state for one invocation.
pub struct RepoContext {
  /// Repository root (git working tree, absolute path)
  pub root: PathBuf,

  /// System git handle, opened at the root
  pub git: SystemGit,

  /// Ripple configuration (ripple.toml)
  /// Optional because the tool runs fine on unconfigured repositories
  pub config: Option<RippleConfig>,
}

impl RepoContext {
  /// Build repository context from the invocation directory.
  ///
  /// Resolves the working-tree root through git, then attempts to load
  /// ripple.toml from it. Config is optional - built-in defaults cover
  /// everything.
  pub fn build(start_dir: &Path) -> RippleResult<Self> {
    let git = SystemGit::open(start_dir)?;
    let root = git.work_tree().to_path_buf();
    let config = RippleConfig::load(&root).ok(); // Optional - not all repos carry one

    Ok(Self { root, git, config })
  }

  /// Get repository root as Path reference (convenience)
  pub fn repo_root(&self) -> &Path {
    &self.root
  }

  /// Resolve the base/head refs for a range. A missing base falls back to
  /// the detected base branch, a missing head to the current branch.
  pub fn resolve_range(&self, base: Option<String>, head: Option<String>) -> RippleResult<(String, String)> {
    let base = match base {
      Some(base) => base,
      None => self.git.detect_base_branch(),
    };
    let head = match head {
      Some(head) => head,
      None => self.git.current_branch()?,
    };

    Ok((base, head))
  }

  /// Effective analyzer options: CLI flags win, then ripple.toml, then
  /// built-in defaults.
  pub fn analysis_options(&self, max_depth: Option<usize>, no_reverse_deps: bool) -> AnalysisOptions {
    let defaults = self
      .config
      .as_ref()
      .map(|config| config.analysis.clone())
      .unwrap_or_default();

    AnalysisOptions {
      include_reverse_deps: !no_reverse_deps && defaults.include_reverse_deps,
      max_depth: max_depth.unwrap_or(defaults.max_depth),
    }
  }

  /// Directory where impact documents land, absolute.
  pub fn output_dir(&self) -> PathBuf {
    let output = self
      .config
      .as_ref()
      .map(|config| config.output.clone())
      .unwrap_or_default();

    self.root.join(output.dir)
  }
}

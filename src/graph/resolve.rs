//! Import specifier resolution
//!
//! Maps a raw specifier (`'./util'`, `'../styles/theme'`, `'/src/app'`) to
//! the repo-relative path of the file it names, or to nothing. Only
//! relative and root-absolute specifiers resolve; anything else is an
//! external package and produces no edge. Resolution consults the
//! filesystem purely as an existence oracle: a specifier resolves iff the
//! probed file is actually on disk.

use std::path::Path;

use crate::utils::{normalize_segments, parent_dir};

/// Suffixes probed, in order, when a specifier has no extension. The first
/// hit wins; the same order is then retried as `<candidate>/index.<ext>`.
pub const PROBE_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx", "svelte", "json", "css", "scss"];

/// Resolve `specifier` as written in `from_file` against the repository at
/// `repo_root`.
///
/// Returns the repo-relative path of the resolved file, or `None` for
/// external packages, specifiers that climb out of the repository, and
/// candidates that do not exist on disk.
pub fn resolve_import(specifier: &str, from_file: &str, repo_root: &Path) -> Option<String> {
  let combined = if specifier.starts_with('.') {
    let dir = parent_dir(from_file);
    if dir.is_empty() {
      specifier.to_string()
    } else {
      format!("{}/{}", dir, specifier)
    }
  } else if let Some(rooted) = specifier.strip_prefix('/') {
    // Absolute specifiers are taken as repo-root-relative.
    rooted.to_string()
  } else {
    // Bare specifier: an external package, never an in-tree file.
    return None;
  };

  let candidate = normalize_segments(&combined)?;

  if Path::new(&candidate).extension().is_none() {
    for ext in PROBE_EXTENSIONS {
      let with_ext = format!("{}.{}", candidate, ext);
      if repo_root.join(&with_ext).is_file() {
        return Some(with_ext);
      }
    }

    for ext in PROBE_EXTENSIONS {
      let with_index = if candidate.is_empty() {
        format!("index.{}", ext)
      } else {
        format!("{}/index.{}", candidate, ext)
      };
      if repo_root.join(&with_index).is_file() {
        return Some(with_index);
      }
    }
  }

  if repo_root.join(&candidate).is_file() {
    return Some(candidate);
  }

  None
}

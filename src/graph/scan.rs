//! Repository source discovery
//!
//! Walks the conventional source roots and collects every file worth
//! indexing. The walk is depth-first with directory entries sorted by name,
//! so the discovery order (and everything downstream that depends on it) is
//! stable across runs and platforms. Unreadable directories are skipped
//! silently.

use std::fs;
use std::path::{Path, PathBuf};

/// Conventional source roots, scanned when present. When none exist the
/// whole repository root is scanned instead.
pub const SCAN_ROOTS: &[&str] = &["src", "frontend", "backend", "app", "lib"];

/// Directory names never descended into.
pub const IGNORED_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", ".next", "coverage"];

/// Extensions of files worth indexing. Compared case-sensitively, the way
/// the files were named on disk.
pub const SCAN_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx", "svelte", "vue", "css", "scss"];

/// The directories a scan of `repo_root` actually visits.
pub fn scan_roots(repo_root: &Path) -> Vec<PathBuf> {
  let conventional: Vec<PathBuf> = SCAN_ROOTS
    .iter()
    .map(|name| repo_root.join(name))
    .filter(|path| path.is_dir())
    .collect();

  if !conventional.is_empty() {
    return conventional;
  }

  if repo_root.is_dir() {
    vec![repo_root.to_path_buf()]
  } else {
    Vec::new()
  }
}

/// Collect every indexable source file under the scan roots of `repo_root`,
/// in deterministic walk order. Absolute paths.
pub fn collect_source_files(repo_root: &Path) -> Vec<PathBuf> {
  let mut files = Vec::new();
  for root in scan_roots(repo_root) {
    walk(&root, &mut files);
  }
  files
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) {
  let Ok(entries) = fs::read_dir(dir) else {
    return;
  };

  let mut entries: Vec<_> = entries.flatten().collect();
  entries.sort_by_key(|entry| entry.file_name());

  for entry in entries {
    let path = entry.path();
    let Ok(file_type) = entry.file_type() else {
      continue;
    };

    if file_type.is_dir() {
      let name = entry.file_name();
      let ignored = name
        .to_str()
        .is_some_and(|name| IGNORED_DIRS.contains(&name));
      if !ignored {
        walk(&path, files);
      }
    } else if file_type.is_file() && has_scan_extension(&path) {
      files.push(path);
    }
  }
}

fn has_scan_extension(path: &Path) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| SCAN_EXTENSIONS.contains(&ext))
}

//! Shared path helpers
//!
//! Every path inside the analyzer is a repo-relative string with forward
//! slashes and no leading separator. These helpers are the only place where
//! normalization happens, so the graph, the crawler, and the document
//! builder always compare paths in the same form.

use std::path::Path;

/// Lexically resolve `.` and `..` segments in a repo-relative path.
///
/// Returns `None` when the path climbs above the repository root. Empty
/// segments (doubled slashes) are dropped. No filesystem access.
pub fn normalize_segments(path: &str) -> Option<String> {
  let mut resolved: Vec<&str> = Vec::new();

  for segment in path.split('/') {
    match segment {
      "" | "." => continue,
      ".." => {
        if resolved.pop().is_none() {
          return None;
        }
      }
      other => resolved.push(other),
    }
  }

  Some(resolved.join("/"))
}

/// Convert an absolute path under `root` into the repo-relative string form.
///
/// Returns `None` when the path is not under `root` or contains segments
/// that are not valid UTF-8.
pub fn to_repo_relative(path: &Path, root: &Path) -> Option<String> {
  let relative = path.strip_prefix(root).ok()?;

  let mut segments = Vec::new();
  for component in relative.components() {
    segments.push(component.as_os_str().to_str()?);
  }

  Some(segments.join("/"))
}

/// The directory portion of a repo-relative path, or `""` for files at the
/// repository root.
pub fn parent_dir(path: &str) -> &str {
  match path.rfind('/') {
    Some(idx) => &path[..idx],
    None => "",
  }
}

/// The final segment of a repo-relative path.
pub fn file_label(path: &str) -> &str {
  match path.rfind('/') {
    Some(idx) => &path[idx + 1..],
    None => path,
  }
}

/// The lowercased extension of a repo-relative path, without the dot.
pub fn extension_of(path: &str) -> Option<String> {
  Path::new(path)
    .extension()
    .and_then(|ext| ext.to_str())
    .map(|ext| ext.to_ascii_lowercase())
}

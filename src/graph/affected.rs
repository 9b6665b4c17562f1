//! Changed-file impact analysis
//!
//! Given the changed files of a revision range, determine:
//! - Which changed files import one another (direct PR-internal coupling)
//! - Which unchanged files depend on the changed set, directly or
//!   transitively, within a bounded depth
//!
//! The analyzer is total: any input produces a result. Unreadable files
//! degrade to "no imports", a missing repository root degrades to an empty
//! crawl, and malformed content is never an error. All traversal state is
//! local to one call, so concurrent analyses of different revisions cannot
//! interfere.

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::vcs::ChangedFile;
use crate::graph::import_graph::ImportGraph;
use crate::graph::imports::extract_imports;
use crate::graph::resolve::resolve_import;

/// Default traversal depth for the reverse crawl.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Knobs for one analysis call.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisOptions {
  /// Crawl outward from the changed set to find dependent files
  pub include_reverse_deps: bool,

  /// Bound on reverse-dependency chain length
  pub max_depth: usize,
}

impl Default for AnalysisOptions {
  fn default() -> Self {
    AnalysisOptions {
      include_reverse_deps: true,
      max_depth: DEFAULT_MAX_DEPTH,
    }
  }
}

/// A directed "imports" relation between two repo-relative paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
  /// The file containing the import statement
  pub from: String,

  /// The file it depends on
  pub to: String,

  pub relation: String,
}

impl DependencyEdge {
  pub fn imports(from: impl Into<String>, to: impl Into<String>) -> Self {
    DependencyEdge {
      from: from.into(),
      to: to.into(),
      relation: "imports".to_string(),
    }
  }
}

/// Complete impact analysis for one changed set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResult {
  /// Forward edges between changed files, then reverse edges in
  /// discovery order
  pub edges: Vec<DependencyEdge>,

  /// Unchanged files that depend on the changed set, first-discovered
  /// order. Always disjoint from the changed paths.
  pub affected_files: Vec<String>,
}

/// Analyze the import impact of `changed` within the repository at
/// `repo_root`.
///
/// Algorithm:
/// 1. Link changed files to each other (read each, resolve its imports,
///    keep edges landing inside the changed set)
/// 2. Build the repository import index once, then breadth-first crawl
///    importers outward from every changed path up to `max_depth`
/// 3. Merge edge lists, dedup, and return affected files in discovery
///    order
///
/// # Performance
/// One tree walk and one read per indexed file, regardless of how many
/// changed files seed the crawl.
pub fn analyze(changed: &[ChangedFile], repo_root: &Path, options: &AnalysisOptions) -> AnalysisResult {
  if changed.is_empty() {
    return AnalysisResult::default();
  }

  let changed_set: HashSet<&str> = changed.iter().map(|file| file.path.as_str()).collect();

  let mut edges = link_changed_files(changed, &changed_set, repo_root);
  let mut affected_files = Vec::new();

  if options.include_reverse_deps {
    let (reverse_edges, affected) =
      crawl_importers(changed, &changed_set, repo_root, options.max_depth);
    edges.extend(reverse_edges);
    affected_files = affected;
  }

  dedup_edges(&mut edges);

  AnalysisResult {
    edges,
    affected_files,
  }
}

/// Edges between changed files only. Dependencies that leave the changed
/// set are the crawler's job.
fn link_changed_files(
  changed: &[ChangedFile],
  changed_set: &HashSet<&str>,
  repo_root: &Path,
) -> Vec<DependencyEdge> {
  let mut edges = Vec::new();

  for file in changed {
    // Deleted or otherwise unreadable files contribute no imports.
    let Ok(content) = fs::read_to_string(repo_root.join(&file.path)) else {
      continue;
    };

    for specifier in extract_imports(&content, &file.path) {
      if let Some(target) = resolve_import(&specifier, &file.path, repo_root) {
        if changed_set.contains(target.as_str()) {
          edges.push(DependencyEdge::imports(file.path.clone(), target));
        }
      }
    }
  }

  edges
}

/// Breadth-first crawl over the reverse-import index, outward from every
/// changed path at depth 0.
///
/// Each file enters the queue at most once, so the crawl terminates on
/// cyclic and diamond-shaped import graphs. A dequeued entry at
/// `depth >= max_depth` is terminal for its branch: its importers would
/// sit beyond the bound.
fn crawl_importers(
  changed: &[ChangedFile],
  changed_set: &HashSet<&str>,
  repo_root: &Path,
  max_depth: usize,
) -> (Vec<DependencyEdge>, Vec<String>) {
  let index = ImportGraph::build(repo_root);

  let mut queue: VecDeque<(String, usize)> = VecDeque::new();
  let mut seeded: HashSet<&str> = HashSet::new();
  for file in changed {
    if seeded.insert(file.path.as_str()) {
      queue.push_back((file.path.clone(), 0));
    }
  }

  let mut edges = Vec::new();
  let mut affected_seen: HashSet<String> = HashSet::new();
  let mut affected_order: Vec<String> = Vec::new();

  while let Some((path, depth)) = queue.pop_front() {
    if depth >= max_depth {
      continue;
    }

    for importer in index.importers_of(&path) {
      if changed_set.contains(importer.as_str()) {
        continue;
      }

      edges.push(DependencyEdge::imports(importer.clone(), path.clone()));

      if affected_seen.insert(importer.clone()) {
        affected_order.push(importer.clone());
        queue.push_back((importer, depth + 1));
      }
    }
  }

  (edges, affected_order)
}

/// Drop repeated `(from, to)` pairs, keeping the first occurrence.
fn dedup_edges(edges: &mut Vec<DependencyEdge>) {
  let mut seen = HashSet::new();
  edges.retain(|edge| seen.insert((edge.from.clone(), edge.to.clone())));
}

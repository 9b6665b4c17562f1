//! Repository-wide import index
//!
//! A directed graph over repo-relative file paths where an edge `A -> B`
//! means "A imports B". Built in a single pass: one walk of the scan roots,
//! one read per file. Once built, every reverse-dependency question during a
//! crawl is a graph lookup instead of a fresh scan of the tree.
//!
//! # Design
//!
//! - Nodes are created lazily for both importers and import targets, so a
//!   file that only ever appears as a target still has a node.
//! - Parallel edges are collapsed at insertion; a file importing the same
//!   target through two different surface forms contributes one edge.
//! - Files that fail to read are indexed with no outgoing edges. Malformed
//!   content is never an error here.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::graph::imports::extract_imports;
use crate::graph::resolve::resolve_import;
use crate::graph::scan::collect_source_files;
use crate::utils::to_repo_relative;

pub struct ImportGraph {
  graph: DiGraph<String, ()>,
  path_to_node: HashMap<String, NodeIndex>,
}

impl ImportGraph {
  /// Index every source file under the scan roots of `repo_root`.
  pub fn build(repo_root: &Path) -> Self {
    let mut index = ImportGraph {
      graph: DiGraph::new(),
      path_to_node: HashMap::new(),
    };

    for absolute in collect_source_files(repo_root) {
      let Some(file) = to_repo_relative(&absolute, repo_root) else {
        continue;
      };
      let from = index.ensure_node(&file);

      let Ok(content) = fs::read_to_string(&absolute) else {
        continue;
      };

      for specifier in extract_imports(&content, &file) {
        if let Some(target) = resolve_import(&specifier, &file, repo_root) {
          let to = index.ensure_node(&target);
          index.graph.update_edge(from, to, ());
        }
      }
    }

    index
  }

  /// The files that import `path`, in the order the walk discovered them.
  pub fn importers_of(&self, path: &str) -> Vec<String> {
    let Some(&node) = self.path_to_node.get(path) else {
      return Vec::new();
    };

    let mut importers: Vec<String> = self
      .graph
      .neighbors_directed(node, Direction::Incoming)
      .map(|idx| self.graph[idx].clone())
      .collect();

    // petgraph yields incoming neighbors newest-edge-first; flip back to
    // insertion order so discovery order follows the walk.
    importers.reverse();
    importers
  }

  fn ensure_node(&mut self, path: &str) -> NodeIndex {
    if let Some(&node) = self.path_to_node.get(path) {
      return node;
    }
    let node = self.graph.add_node(path.to_string());
    self.path_to_node.insert(path.to_string(), node);
    node
  }
}

//! Presentation-ready impact documents
//!
//! Merges an `AnalysisResult` with per-file metadata (change status, diff
//! text) into the graph document that renderers consume: a `meta` block
//! with tool identity and aggregate counts, then `nodes` and `edges`
//! arrays. Modified nodes come first in input order, affected nodes follow
//! in discovery order. Also renders the Mermaid flowchart form of the same
//! graph.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::error::RippleResult;
use crate::core::vcs::ChangedFile;
use crate::graph::affected::{AnalysisResult, DependencyEdge};
use crate::utils::file_label;

/// Stable identifier for one analysis, derived from the revision range and
/// the changed paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphId(String);

impl GraphId {
  pub fn from_analysis(base: &str, head: &str, changed: &[ChangedFile]) -> Self {
    let mut hasher = Sha256::new();
    hasher.update(base.as_bytes());
    hasher.update(b"\0");
    hasher.update(head.as_bytes());
    hasher.update(b"\0");
    for file in changed {
      hasher.update(file.path.as_bytes());
      hasher.update(b"\n");
    }
    GraphId(format!("{:x}", hasher.finalize()))
  }

  /// First 12 hex characters, enough to name output files.
  pub fn short(&self) -> &str {
    &self.0[..12.min(self.0.len())]
  }
}

/// Aggregate counts for the `meta` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
  pub modified_files: usize,
  pub affected_files: usize,
  pub total_files: usize,
  pub dependencies: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphMeta {
  pub tool: String,
  pub version: String,
  #[serde(rename = "type")]
  pub doc_type: String,
  pub id: String,
  pub base: String,
  pub head: String,
  pub generated_at: DateTime<Utc>,
  pub stats: GraphStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
  /// Repo-relative path
  pub id: String,

  /// Basename, for display
  pub label: String,

  pub kind: String,

  /// Lowercased change kind for modified nodes, `"affected"` otherwise
  pub status: String,

  pub modified: bool,

  /// Unified diff text, present only for edited files when available
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub diff: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactDocument {
  pub meta: GraphMeta,
  pub nodes: Vec<GraphNode>,
  pub edges: Vec<DependencyEdge>,
}

impl ImpactDocument {
  /// Assemble the document for one analyzed revision range.
  pub fn build(
    base: &str,
    head: &str,
    changed: &[ChangedFile],
    diffs: &HashMap<String, String>,
    analysis: &AnalysisResult,
  ) -> Self {
    let id = GraphId::from_analysis(base, head, changed);

    let mut nodes = Vec::with_capacity(changed.len() + analysis.affected_files.len());
    for file in changed {
      nodes.push(GraphNode {
        id: file.path.clone(),
        label: file_label(&file.path).to_string(),
        kind: "file".to_string(),
        status: file.kind.as_status().to_string(),
        modified: true,
        diff: diffs.get(&file.path).cloned(),
      });
    }
    for path in &analysis.affected_files {
      nodes.push(GraphNode {
        id: path.clone(),
        label: file_label(path).to_string(),
        kind: "file".to_string(),
        status: "affected".to_string(),
        modified: false,
        diff: None,
      });
    }

    let stats = GraphStats {
      modified_files: changed.len(),
      affected_files: analysis.affected_files.len(),
      total_files: nodes.len(),
      dependencies: analysis.edges.len(),
    };

    ImpactDocument {
      meta: GraphMeta {
        tool: "ripple".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        doc_type: "pr-impact".to_string(),
        id: id.short().to_string(),
        base: base.to_string(),
        head: head.to_string(),
        generated_at: Utc::now(),
        stats,
      },
      nodes,
      edges: analysis.edges.clone(),
    }
  }

  pub fn short_id(&self) -> &str {
    &self.meta.id
  }

  pub fn to_json(&self) -> RippleResult<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Render the graph as a Mermaid flowchart. Node ids keep only
  /// alphanumerics so the output survives Mermaid's identifier rules.
  pub fn to_mermaid(&self) -> String {
    let mut out = String::from("graph TD\n");

    for node in &self.nodes {
      let id = mermaid_id(&node.id);
      let label = node.label.replace('"', "'");
      let class = if node.modified { ":::modified" } else { ":::affected" };
      out.push_str(&format!("  {}[\"{}\"]{}\n", id, label, class));
    }

    out.push('\n');
    for edge in &self.edges {
      out.push_str(&format!(
        "  {} --> {}\n",
        mermaid_id(&edge.from),
        mermaid_id(&edge.to)
      ));
    }

    out.push('\n');
    out.push_str("  classDef modified fill:#f85149,stroke:#da3633,color:#fff\n");
    out.push_str("  classDef affected fill:#d29922,stroke:#bb8009,color:#fff\n");
    out
  }
}

fn mermaid_id(path: &str) -> String {
  path
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
    .collect()
}

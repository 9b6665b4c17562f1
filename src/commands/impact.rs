//! `ripple impact` - Show which files a revision range touches
//!
//! This command diffs the range (via git) and determines:
//! - Which changed files import one another
//! - Which unchanged files depend on the changed set, within the depth
//!   bound

use crate::core::context::RepoContext;
use crate::core::error::{RippleError, RippleResult};
use crate::core::vcs::ChangedFile;
use crate::graph::AnalysisResult;

/// Output format for impact command
#[derive(Debug, Clone, Copy)]
enum OutputFormat {
  Text,
  Json,
  NamesOnly,
}

impl OutputFormat {
  fn from_str(s: &str) -> RippleResult<Self> {
    match s.to_lowercase().as_str() {
      "text" => Ok(Self::Text),
      "json" => Ok(Self::Json),
      "names" | "names-only" => Ok(Self::NamesOnly),
      _ => Err(RippleError::validation(format!(
        "Unknown format '{}'. Valid formats: text, json, names-only",
        s
      ))),
    }
  }
}

/// Run the impact command
pub fn run_impact(
  ctx: &RepoContext,
  base: Option<String>,
  head: Option<String>,
  max_depth: Option<usize>,
  no_reverse_deps: bool,
  format: String,
) -> RippleResult<()> {
  let output_format = OutputFormat::from_str(&format)?;

  let (base, head) = ctx.resolve_range(base, head)?;
  let changed = ctx.git.changed_files_between(&base, &head)?;
  let options = ctx.analysis_options(max_depth, no_reverse_deps);

  let analysis = crate::graph::analyze(&changed, ctx.repo_root(), &options);

  match output_format {
    OutputFormat::Text => display_text(&base, &head, &changed, &analysis),
    OutputFormat::Json => display_json(&base, &head, &changed, &analysis),
    OutputFormat::NamesOnly => display_names_only(&analysis),
  }
}

/// Display results in human-readable text format
fn display_text(
  base: &str,
  head: &str,
  changed: &[ChangedFile],
  analysis: &AnalysisResult,
) -> RippleResult<()> {
  println!("Impact Analysis");
  println!("===============");
  println!();
  println!("Comparing {}...{}", base, head);
  println!();

  println!("Changed files: {}", changed.len());
  if !changed.is_empty() && changed.len() <= 20 {
    for file in changed {
      println!("  {} {}", file.kind.as_marker(), file.path);
    }
  }
  println!();

  println!("Affected files: {}", analysis.affected_files.len());
  for path in &analysis.affected_files {
    println!("  [AFFECTED] {}", path);
  }
  println!();

  println!("Dependency edges: {}", analysis.edges.len());
  for edge in &analysis.edges {
    println!("  {} -> {}", edge.from, edge.to);
  }

  Ok(())
}

/// Display results in JSON format
fn display_json(
  base: &str,
  head: &str,
  changed: &[ChangedFile],
  analysis: &AnalysisResult,
) -> RippleResult<()> {
  use serde_json::json;

  let changed_files: Vec<_> = changed
    .iter()
    .map(|file| {
      json!({
          "path": file.path,
          "status": file.kind.as_status()
      })
    })
    .collect();

  let output = json!({
      "base": base,
      "head": head,
      "changed_files": changed_files,
      "affected_files": analysis.affected_files,
      "edges": analysis.edges,
      "summary": {
          "changed_files_count": changed.len(),
          "affected_files_count": analysis.affected_files.len(),
          "edge_count": analysis.edges.len()
      }
  });

  println!("{}", serde_json::to_string_pretty(&output)?);

  Ok(())
}

/// Display only affected file paths, one per line
fn display_names_only(analysis: &AnalysisResult) -> RippleResult<()> {
  for path in &analysis.affected_files {
    println!("{}", path);
  }

  Ok(())
}

//! `ripple graph` - Write the impact graph document for a revision range
//!
//! Builds the presentation document (meta, nodes, edges), enriches edited
//! nodes with diff text, and writes it under the output directory. With
//! `--mermaid` a flowchart rendition lands next to it.

use crate::core::context::RepoContext;
use crate::core::error::{ResultExt, RippleResult};
use crate::core::vcs::{ChangeKind, ChangedFile};
use crate::graph::{AnalysisResult, ImpactDocument};
use crate::ui::progress::FileProgress;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Run the graph command
pub fn run_graph(
  ctx: &RepoContext,
  base: Option<String>,
  head: Option<String>,
  max_depth: Option<usize>,
  no_reverse_deps: bool,
  output: Option<PathBuf>,
  mermaid: bool,
) -> RippleResult<()> {
  let (base, head) = ctx.resolve_range(base, head)?;
  let changed = ctx.git.changed_files_between(&base, &head)?;
  let options = ctx.analysis_options(max_depth, no_reverse_deps);

  println!("Comparing {}...{}", base, head);

  let analysis = crate::graph::analyze(&changed, ctx.repo_root(), &options);
  let diffs = collect_diffs(ctx, &base, &head, &changed);
  let document = ImpactDocument::build(&base, &head, &changed, &diffs, &analysis);

  let document_path = match output {
    Some(path) => path,
    None => {
      let dir = ctx.output_dir();
      fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
      dir.join(format!("impact-{}.json", document.short_id()))
    }
  };

  fs::write(&document_path, document.to_json()?)
    .with_context(|| format!("Failed to write {}", document_path.display()))?;

  println!();
  println!("Impact graph written to {}", document_path.display());

  if mermaid {
    let mermaid_path = document_path.with_extension("mmd");
    fs::write(&mermaid_path, document.to_mermaid())
      .with_context(|| format!("Failed to write {}", mermaid_path.display()))?;
    println!("Mermaid diagram written to {}", mermaid_path.display());
  }

  display_summary(&changed, &analysis);

  Ok(())
}

/// Fetch diff text for edited files, one git call each. Failures degrade
/// to nodes without diff text.
fn collect_diffs(
  ctx: &RepoContext,
  base: &str,
  head: &str,
  changed: &[ChangedFile],
) -> HashMap<String, String> {
  let mut diffs = HashMap::new();
  if changed.is_empty() {
    return diffs;
  }

  let mut bar = FileProgress::new(changed.len(), "Collecting diffs");
  for file in changed {
    if file.kind == ChangeKind::Edit {
      if let Some(diff) = ctx.git.diff_file(base, head, &file.path) {
        diffs.insert(file.path.clone(), diff);
      }
    }
    bar.inc();
  }

  diffs
}

/// Console summary: every modified file, affected files capped at ten.
fn display_summary(changed: &[ChangedFile], analysis: &AnalysisResult) {
  println!();
  println!(
    "{} modified, {} affected, {} dependency edges",
    changed.len(),
    analysis.affected_files.len(),
    analysis.edges.len()
  );

  for file in changed {
    println!("  {} {}", file.kind.as_marker(), file.path);
  }

  for path in analysis.affected_files.iter().take(10) {
    println!("  [AFFECTED] {}", path);
  }
  if analysis.affected_files.len() > 10 {
    println!("  ... and {} more", analysis.affected_files.len() - 10);
  }
}

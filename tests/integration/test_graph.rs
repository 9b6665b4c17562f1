//! Integration tests for `ripple graph` command

use crate::helpers::{TestRepo, run_ripple};
use anyhow::Result;
use std::path::PathBuf;

/// Fixture: c.js imports a.js, and a.js changes after the baseline
fn import_chain_repo() -> Result<TestRepo> {
  let repo = TestRepo::new()?;
  repo.write_file("src/a.js", "export const a = 1;\n")?;
  repo.write_file("src/c.js", "import { a } from './a';\n\nexport const c = a;\n")?;
  repo.commit("Add a and c")?;
  repo.branch("origin/main")?;

  repo.write_file("src/a.js", "export const a = 2;\n")?;
  repo.commit("Change a")?;

  Ok(repo)
}

/// Find the JSON documents under a directory
fn json_documents(dir: &std::path::Path) -> Result<Vec<PathBuf>> {
  let mut docs: Vec<PathBuf> = std::fs::read_dir(dir)?
    .flatten()
    .map(|entry| entry.path())
    .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
    .collect();
  docs.sort();
  Ok(docs)
}

#[test]
fn test_graph_writes_document() -> Result<()> {
  let repo = import_chain_repo()?;

  let output = run_ripple(&repo.path, &["graph", "--base", "origin/main"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Impact graph written to"), "got: {}", stdout);
  assert!(stdout.contains("1 modified, 1 affected, 1 dependency edges"), "got: {}", stdout);

  let docs = json_documents(&repo.path.join(".ripple"))?;
  assert_eq!(docs.len(), 1, "expected one document, got: {:?}", docs);

  let name = docs[0].file_name().and_then(|n| n.to_str()).unwrap_or("");
  assert!(name.starts_with("impact-"), "got: {}", name);

  let doc: serde_json::Value = serde_json::from_str(&repo.read_file(&format!(".ripple/{}", name))?)?;
  assert_eq!(doc["meta"]["tool"], "ripple");
  assert_eq!(doc["meta"]["type"], "pr-impact");
  assert_eq!(doc["meta"]["base"], "origin/main");
  assert_eq!(doc["meta"]["head"], "main");
  assert_eq!(doc["meta"]["stats"]["modified_files"], 1);
  assert_eq!(doc["meta"]["stats"]["affected_files"], 1);
  assert_eq!(doc["meta"]["stats"]["total_files"], 2);
  assert_eq!(doc["meta"]["stats"]["dependencies"], 1);

  // Modified node first, affected node second
  assert_eq!(doc["nodes"][0]["id"], "src/a.js");
  assert_eq!(doc["nodes"][0]["status"], "edit");
  assert_eq!(doc["nodes"][0]["modified"], true);
  assert_eq!(doc["nodes"][1]["id"], "src/c.js");
  assert_eq!(doc["nodes"][1]["status"], "affected");
  assert_eq!(doc["nodes"][1]["modified"], false);

  assert_eq!(doc["edges"][0]["from"], "src/c.js");
  assert_eq!(doc["edges"][0]["to"], "src/a.js");
  assert_eq!(doc["edges"][0]["relation"], "imports");

  Ok(())
}

#[test]
fn test_graph_attaches_diff_to_edited_nodes() -> Result<()> {
  let repo = import_chain_repo()?;

  run_ripple(&repo.path, &["graph", "--base", "origin/main"])?;

  let docs = json_documents(&repo.path.join(".ripple"))?;
  let doc: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&docs[0])?)?;

  let diff = doc["nodes"][0]["diff"].as_str().expect("edited node should carry a diff");
  assert!(diff.contains("diff --git"), "got: {}", diff);

  // The affected node was not edited, so it has no diff key at all
  assert!(doc["nodes"][1].get("diff").is_none());

  Ok(())
}

#[test]
fn test_graph_custom_output_path() -> Result<()> {
  let repo = import_chain_repo()?;

  let output = run_ripple(&repo.path, &["graph", "--base", "origin/main", "--output", "impact.json"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Impact graph written to impact.json"), "got: {}", stdout);
  assert!(repo.path.join("impact.json").exists());
  assert!(!repo.path.join(".ripple").exists(), "default directory should stay untouched");

  Ok(())
}

#[test]
fn test_graph_mermaid_diagram() -> Result<()> {
  let repo = import_chain_repo()?;

  run_ripple(
    &repo.path,
    &["graph", "--base", "origin/main", "--output", "impact.json", "--mermaid"],
  )?;

  let mermaid = repo.read_file("impact.mmd")?;
  assert!(mermaid.starts_with("graph TD"), "got: {}", mermaid);
  assert!(mermaid.contains("src_a_js[\"a.js\"]:::modified"), "got: {}", mermaid);
  assert!(mermaid.contains("src_c_js[\"c.js\"]:::affected"), "got: {}", mermaid);
  assert!(mermaid.contains("src_c_js --> src_a_js"), "got: {}", mermaid);
  assert!(mermaid.contains("classDef modified"), "got: {}", mermaid);

  Ok(())
}

#[test]
fn test_graph_honors_configured_output_dir() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("ripple.toml", "[output]\ndir = \"reports\"\n")?;
  repo.write_file("src/a.js", "export const a = 1;\n")?;
  repo.commit("Add a with config")?;
  repo.branch("origin/main")?;

  repo.write_file("src/a.js", "export const a = 2;\n")?;
  repo.commit("Change a")?;

  run_ripple(&repo.path, &["graph", "--base", "origin/main"])?;

  let docs = json_documents(&repo.path.join("reports"))?;
  assert_eq!(docs.len(), 1, "expected one document, got: {:?}", docs);
  assert!(!repo.path.join(".ripple").exists());

  Ok(())
}

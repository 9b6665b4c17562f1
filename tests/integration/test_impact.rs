//! Integration tests for `ripple impact` command

use crate::helpers::{TestRepo, run_ripple, run_ripple_raw};
use anyhow::Result;

#[test]
fn test_impact_reverse_dependency() -> Result<()> {
  // c.js imports a.js; changing a.js should pull c.js in as affected
  let repo = TestRepo::new()?;
  repo.write_file("src/a.js", "export const a = 1;\n")?;
  repo.write_file("src/c.js", "import { a } from './a';\n\nexport const c = a + 1;\n")?;
  repo.commit("Add a and c")?;
  repo.branch("origin/main")?;

  repo.write_file("src/a.js", "export const a = 2;\n")?;
  repo.commit("Change a")?;

  let output = run_ripple(&repo.path, &["impact", "--base", "origin/main"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Changed files: 1"), "got: {}", stdout);
  assert!(stdout.contains("[AFFECTED] src/c.js"), "got: {}", stdout);
  assert!(stdout.contains("src/c.js -> src/a.js"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_impact_forward_edge_between_changed_files() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.branch("origin/main")?;

  // Both files land in the same range, so the a -> b edge is forward-only
  repo.write_file("src/b.js", "export const b = 3;\n")?;
  repo.write_file("src/a.js", "import { b } from './b';\n\nexport const a = b;\n")?;
  repo.commit("Add a and b")?;

  let output = run_ripple(&repo.path, &["impact", "--base", "origin/main"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("src/a.js -> src/b.js"), "got: {}", stdout);
  assert!(stdout.contains("Affected files: 0"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_impact_depth_bound() -> Result<()> {
  // Chain: d.js -> c.js -> a.js
  let repo = TestRepo::new()?;
  repo.write_file("src/a.js", "export const a = 1;\n")?;
  repo.write_file("src/c.js", "import { a } from './a';\n\nexport const c = a;\n")?;
  repo.write_file("src/d.js", "import { c } from './c';\n\nexport const d = c;\n")?;
  repo.commit("Add chain")?;
  repo.branch("origin/main")?;

  repo.write_file("src/a.js", "export const a = 2;\n")?;
  repo.commit("Change a")?;

  // Depth 1 stops after the direct importers
  let output = run_ripple(&repo.path, &["impact", "--base", "origin/main", "--max-depth", "1"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("[AFFECTED] src/c.js"), "got: {}", stdout);
  assert!(!stdout.contains("src/d.js"), "d.js is two hops away, got: {}", stdout);

  // The default depth of 2 reaches d.js
  let output = run_ripple(&repo.path, &["impact", "--base", "origin/main"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("[AFFECTED] src/c.js"), "got: {}", stdout);
  assert!(stdout.contains("[AFFECTED] src/d.js"), "got: {}", stdout);
  assert!(stdout.contains("src/d.js -> src/c.js"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_impact_external_package_ignored() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.branch("origin/main")?;

  repo.write_file("src/b.js", "export const b = 1;\n")?;
  repo.write_file(
    "src/a.js",
    "import debounce from 'lodash';\nimport { b } from './b';\n\nexport const a = b;\n",
  )?;
  repo.commit("Add files with external import")?;

  let output = run_ripple(&repo.path, &["impact", "--base", "origin/main"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  // The bare specifier resolves to nothing; only the relative edge survives
  assert!(!stdout.contains("lodash"), "got: {}", stdout);
  assert!(stdout.contains("src/a.js -> src/b.js"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_impact_stylesheet_import() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("src/theme.css", "body { margin: 0; }\n")?;
  repo.write_file("src/app.scss", "@import \"./theme\";\n\nbody { color: red; }\n")?;
  repo.commit("Add styles")?;
  repo.branch("origin/main")?;

  repo.write_file("src/theme.css", "body { margin: 1px; }\n")?;
  repo.commit("Change theme")?;

  let output = run_ripple(&repo.path, &["impact", "--base", "origin/main"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("[AFFECTED] src/app.scss"), "got: {}", stdout);
  assert!(stdout.contains("src/app.scss -> src/theme.css"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_impact_no_changes() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("src/a.js", "export const a = 1;\n")?;
  repo.commit("Add a")?;
  repo.branch("origin/main")?;

  let output = run_ripple(&repo.path, &["impact", "--base", "origin/main"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Changed files: 0"), "got: {}", stdout);
  assert!(stdout.contains("Affected files: 0"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_impact_json_output() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("src/a.js", "export const a = 1;\n")?;
  repo.write_file("src/c.js", "import { a } from './a';\n\nexport const c = a;\n")?;
  repo.commit("Add a and c")?;
  repo.branch("origin/main")?;

  repo.write_file("src/a.js", "export const a = 2;\n")?;
  repo.commit("Change a")?;

  let output = run_ripple(&repo.path, &["impact", "--base", "origin/main", "--format", "json"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  let json: serde_json::Value = serde_json::from_str(&stdout).expect("Should be valid JSON");
  assert_eq!(json["base"], "origin/main");
  assert_eq!(json["head"], "main");
  assert_eq!(json["changed_files"][0]["path"], "src/a.js");
  assert_eq!(json["changed_files"][0]["status"], "edit");
  assert_eq!(json["affected_files"][0], "src/c.js");
  assert_eq!(json["edges"][0]["from"], "src/c.js");
  assert_eq!(json["edges"][0]["to"], "src/a.js");
  assert_eq!(json["edges"][0]["relation"], "imports");
  assert_eq!(json["summary"]["changed_files_count"], 1);
  assert_eq!(json["summary"]["affected_files_count"], 1);
  assert_eq!(json["summary"]["edge_count"], 1);

  Ok(())
}

#[test]
fn test_impact_names_only() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("src/a.js", "export const a = 1;\n")?;
  repo.write_file("src/c.js", "import { a } from './a';\n\nexport const c = a;\n")?;
  repo.commit("Add a and c")?;
  repo.branch("origin/main")?;

  repo.write_file("src/a.js", "export const a = 2;\n")?;
  repo.commit("Change a")?;

  let output = run_ripple(
    &repo.path,
    &["impact", "--base", "origin/main", "--format", "names-only"],
  )?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  let lines: Vec<&str> = stdout.trim().lines().collect();
  assert_eq!(lines, vec!["src/c.js"]);

  Ok(())
}

#[test]
fn test_impact_no_reverse_deps_flag() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("src/a.js", "export const a = 1;\n")?;
  repo.write_file("src/c.js", "import { a } from './a';\n\nexport const c = a;\n")?;
  repo.commit("Add a and c")?;
  repo.branch("origin/main")?;

  repo.write_file("src/a.js", "export const a = 2;\n")?;
  repo.commit("Change a")?;

  let output = run_ripple(&repo.path, &["impact", "--base", "origin/main", "--no-reverse-deps"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Affected files: 0"), "got: {}", stdout);
  assert!(!stdout.contains("src/c.js"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_impact_detects_base_branch() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("src/a.js", "export const a = 1;\n")?;
  repo.write_file("src/c.js", "import { a } from './a';\n\nexport const c = a;\n")?;
  repo.commit("Add a and c")?;
  repo.branch("origin/main")?;

  repo.write_file("src/a.js", "export const a = 2;\n")?;
  repo.commit("Change a")?;

  // No --base: origin/main should be picked up automatically
  let output = run_ripple(&repo.path, &["impact"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Comparing origin/main...main"), "got: {}", stdout);
  assert!(stdout.contains("[AFFECTED] src/c.js"), "got: {}", stdout);

  Ok(())
}

#[test]
fn test_impact_config_sets_default_depth() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("ripple.toml", "[analysis]\nmax_depth = 1\n")?;
  repo.write_file("src/a.js", "export const a = 1;\n")?;
  repo.write_file("src/c.js", "import { a } from './a';\n\nexport const c = a;\n")?;
  repo.write_file("src/d.js", "import { c } from './c';\n\nexport const d = c;\n")?;
  repo.commit("Add chain with config")?;
  repo.branch("origin/main")?;

  repo.write_file("src/a.js", "export const a = 2;\n")?;
  repo.commit("Change a")?;

  let output = run_ripple(&repo.path, &["impact", "--base", "origin/main"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("[AFFECTED] src/c.js"), "got: {}", stdout);
  assert!(!stdout.contains("src/d.js"), "config depth is 1, got: {}", stdout);

  Ok(())
}

#[test]
fn test_impact_unknown_format() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.branch("origin/main")?;

  let output = run_ripple_raw(&repo.path, &["impact", "--base", "origin/main", "--format", "yaml"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr.contains("Unknown format 'yaml'"), "got: {}", stderr);

  Ok(())
}

#[test]
fn test_impact_unknown_revision() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_ripple_raw(&repo.path, &["impact", "--base", "no-such-branch"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert!(!output.status.success());
  assert!(stderr.contains("Unknown revision"), "got: {}", stderr);
  assert!(stderr.contains("Help:"), "got: {}", stderr);

  Ok(())
}

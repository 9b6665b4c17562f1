//! Lexical import extraction
//!
//! Pulls import specifiers out of source text with regular expressions, one
//! small pattern table per file category. This is deliberately not a parser:
//! the patterns recognize the common surface forms of each import style and
//! ignore everything else. Missed imports are acceptable; false positives on
//! well-formed code are not. Concatenated or computed specifiers are never
//! recognized.
//!
//! Commented-out imports are still matched. That is an accepted false
//! positive of the lexical approach: the edge it creates points at a real
//! file either way.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::extension_of;

/// Extensions treated as script sources (ESM / CommonJS import forms).
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx", "svelte", "mjs", "cjs"];

/// Extensions treated as stylesheets (`@import` form).
pub const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less"];

// `import defaultExport from '..'`, `import { a, b } from '..'`,
// `import * as ns from '..'`, and bare `import '..'` side-effect form.
static SCRIPT_IMPORT_FROM: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"import\s+(?:[\w{},\s*]+\s+from\s+)?['"]([^'"]+)['"]"#).unwrap()
});

// `require('..')` with optional interior whitespace.
static SCRIPT_REQUIRE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"require\s*\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap());

// Dynamic `import('..')`. Distinct from the static form above: that one
// requires whitespace after the keyword, this one requires a parenthesis.
static SCRIPT_DYNAMIC_IMPORT: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"import\s*\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap());

// CSS-family `@import '..'`. The `url(..)` form is not recognized.
static STYLE_AT_IMPORT: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r#"@import\s+['"]([^'"]+)['"]"#).unwrap());

/// Extract every import specifier from `content`.
///
/// The file category is chosen by the lowercased extension of `file_path`.
/// Files of unrecognized categories yield an empty list. Specifiers are
/// returned in match order, per pattern, and are not deduplicated.
pub fn extract_imports(content: &str, file_path: &str) -> Vec<String> {
  match extension_of(file_path) {
    Some(ext) if SCRIPT_EXTENSIONS.contains(&ext.as_str()) => {
      collect(content, &[&SCRIPT_IMPORT_FROM, &SCRIPT_REQUIRE, &SCRIPT_DYNAMIC_IMPORT])
    }
    Some(ext) if STYLE_EXTENSIONS.contains(&ext.as_str()) => collect(content, &[&STYLE_AT_IMPORT]),
    _ => Vec::new(),
  }
}

fn collect(content: &str, patterns: &[&Regex]) -> Vec<String> {
  let mut specifiers = Vec::new();
  for pattern in patterns {
    for captures in pattern.captures_iter(content) {
      if let Some(specifier) = captures.get(1) {
        specifiers.push(specifier.as_str().to_string());
      }
    }
  }
  specifiers
}

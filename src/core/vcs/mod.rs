pub mod system_git;

pub use system_git::SystemGit;

/// How a file changed between two revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
  Add,
  Edit,
  Delete,
  Rename,
  Copy,
  Other,
}

impl ChangeKind {
  /// Map a `--name-status` letter (`A`, `M`, `R100`, ..) to a kind.
  pub fn from_status(status: &str) -> Self {
    match status.chars().next() {
      Some('A') => ChangeKind::Add,
      Some('M') => ChangeKind::Edit,
      Some('D') => ChangeKind::Delete,
      Some('R') => ChangeKind::Rename,
      Some('C') => ChangeKind::Copy,
      _ => ChangeKind::Other,
    }
  }

  /// Lowercase label used in documents and summaries
  pub fn as_status(&self) -> &'static str {
    match self {
      ChangeKind::Add => "add",
      ChangeKind::Edit => "edit",
      ChangeKind::Delete => "delete",
      ChangeKind::Rename => "rename",
      ChangeKind::Copy => "copy",
      ChangeKind::Other => "other",
    }
  }

  /// Bracket marker used in console listings
  pub fn as_marker(&self) -> &'static str {
    match self {
      ChangeKind::Add => "[+]",
      ChangeKind::Edit => "[EDIT]",
      ChangeKind::Delete => "[DELETE]",
      ChangeKind::Rename => "[RENAME]",
      ChangeKind::Copy => "[COPY]",
      ChangeKind::Other => "[?]",
    }
  }
}

/// One changed file in a revision range
#[derive(Debug, Clone)]
pub struct ChangedFile {
  /// Repo-relative path with forward slashes
  pub path: String,

  pub kind: ChangeKind,
}

impl ChangedFile {
  pub fn new(path: impl Into<String>, kind: ChangeKind) -> Self {
    ChangedFile {
      path: path.into(),
      kind,
    }
  }
}

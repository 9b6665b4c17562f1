//! Error types for ripple
//!
//! Hand-rolled error enums with contextual help messages and exit-code
//! mapping. Fallible surfaces (git, config, CLI, document output) return
//! `RippleResult`; the analyzer core itself is total and never returns
//! errors for malformed repository content.

use std::fmt;
use std::path::PathBuf;

/// Result alias used on every fallible surface of the crate.
pub type RippleResult<T> = Result<T, RippleError>;

/// Top-level error type.
#[derive(Debug)]
pub enum RippleError {
  /// Plain message, no structured data
  Message(String),

  /// Invalid user input (bad flag value, bad config value)
  Validation(String),

  /// Git subprocess failures
  Git(GitError),

  /// Configuration loading/validation failures
  Config(ConfigError),

  /// I/O failures that bubble up from the tool surface
  Io(std::io::Error),

  /// Message with an actionable help line
  WithHelp { message: String, help: String },
}

/// Git-specific failures.
#[derive(Debug)]
pub enum GitError {
  /// The given path is not inside a git repository
  RepoNotFound { path: PathBuf },

  /// A git command exited non-zero
  CommandFailed { command: String, stderr: String },
}

/// Configuration failures.
#[derive(Debug)]
pub enum ConfigError {
  /// No ripple.toml found in any search location
  NotFound { repo_root: PathBuf },

  /// A config field holds a value the tool cannot honor
  InvalidValue { field: String, reason: String },
}

/// Process exit codes, one per error family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  General,
  Validation,
  Config,
  Git,
}

impl ExitCode {
  pub fn as_i32(self) -> i32 {
    match self {
      ExitCode::General => 1,
      ExitCode::Validation => 2,
      ExitCode::Config => 3,
      ExitCode::Git => 4,
    }
  }
}

impl RippleError {
  /// Create a plain message error
  pub fn message(msg: impl Into<String>) -> Self {
    RippleError::Message(msg.into())
  }

  /// Create a validation error (bad user input)
  pub fn validation(msg: impl Into<String>) -> Self {
    RippleError::Validation(msg.into())
  }

  /// Create an error with an actionable help line
  pub fn with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
    RippleError::WithHelp {
      message: message.into(),
      help: help.into(),
    }
  }

  /// Map this error to a process exit code
  pub fn exit_code(&self) -> ExitCode {
    match self {
      RippleError::Validation(_) => ExitCode::Validation,
      RippleError::Config(_) => ExitCode::Config,
      RippleError::Git(_) => ExitCode::Git,
      _ => ExitCode::General,
    }
  }
}

impl fmt::Display for RippleError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RippleError::Message(msg) => write!(f, "{}", msg),
      RippleError::Validation(msg) => write!(f, "{}", msg),
      RippleError::Git(err) => write!(f, "{}", err),
      RippleError::Config(err) => write!(f, "{}", err),
      RippleError::Io(err) => write!(f, "{}", err),
      RippleError::WithHelp { message, .. } => write!(f, "{}", message),
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::RepoNotFound { path } => {
        write!(f, "Not a git repository: {}", path.display())
      }
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr.trim())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { repo_root } => {
        write!(f, "No ripple.toml found in {}", repo_root.display())
      }
      ConfigError::InvalidValue { field, reason } => {
        write!(f, "Invalid config value for '{}': {}", field, reason)
      }
    }
  }
}

impl std::error::Error for RippleError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RippleError::Git(err) => Some(err),
      RippleError::Config(err) => Some(err),
      RippleError::Io(err) => Some(err),
      _ => None,
    }
  }
}

impl std::error::Error for GitError {}
impl std::error::Error for ConfigError {}

impl From<GitError> for RippleError {
  fn from(err: GitError) -> Self {
    RippleError::Git(err)
  }
}

impl From<ConfigError> for RippleError {
  fn from(err: ConfigError) -> Self {
    RippleError::Config(err)
  }
}

impl From<std::io::Error> for RippleError {
  fn from(err: std::io::Error) -> Self {
    RippleError::Io(err)
  }
}

impl From<serde_json::Error> for RippleError {
  fn from(err: serde_json::Error) -> Self {
    RippleError::Message(format!("JSON serialization failed: {}", err))
  }
}

/// Extension trait adding `.context(..)` / `.with_context(..)` to results.
pub trait ResultExt<T> {
  fn context(self, msg: &str) -> RippleResult<T>;
  fn with_context<F: FnOnce() -> String>(self, f: F) -> RippleResult<T>;
}

impl<T, E: fmt::Display> ResultExt<T> for Result<T, E> {
  fn context(self, msg: &str) -> RippleResult<T> {
    self.map_err(|e| RippleError::Message(format!("{}: {}", msg, e)))
  }

  fn with_context<F: FnOnce() -> String>(self, f: F) -> RippleResult<T> {
    self.map_err(|e| RippleError::Message(format!("{}: {}", f(), e)))
  }
}

/// Render an error (and its help line, if any) to stderr.
pub fn print_error(err: &RippleError) {
  eprintln!("Error: {}", err);

  if let RippleError::WithHelp { help, .. } = err {
    eprintln!("\nHelp: {}", help);
  }
}

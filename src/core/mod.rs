//! Core engine for ripple operations
//!
//! This module contains the fundamental building blocks for all ripple functionality:
//!
//! - **config**: Ripple configuration (ripple.toml) parsing and validation
//! - **context**: Unified repository context for efficient data sharing across commands
//! - **error**: Comprehensive error types with contextual help messages
//! - **vcs**: Git operations abstraction (SystemGit, changed-file discovery)

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;

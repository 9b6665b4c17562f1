//! CLI commands for ripple
//!
//! This module contains all user-facing command implementations:
//!
//! - **impact**: Analyze a revision range and report the files it touches,
//!   directly and transitively
//! - **graph**: Write the presentation-ready impact graph document (and
//!   optionally its Mermaid rendition)
//!
//! All commands accept `&RepoContext` to avoid redundant repository loads.

pub mod graph;
pub mod impact;

pub use graph::run_graph;
pub use impact::run_impact;

//! Source import graph analysis
//!
//! Built on regex + petgraph for direct control and minimal abstraction.
//! No parser frontend - lexical extraction is the contract, not a shortcut.

pub mod affected;
pub mod document;
pub mod import_graph;
pub mod imports;
pub mod resolve;
pub mod scan;

pub use affected::{AnalysisOptions, AnalysisResult, analyze};
pub use document::ImpactDocument;

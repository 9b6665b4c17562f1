//! Integration tests for the ripple CLI
//!
//! Each test builds a throwaway git repository and drives the compiled
//! binary against it.

mod helpers;
mod test_graph;
mod test_impact;

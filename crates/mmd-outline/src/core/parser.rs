//! Core parser trait for diagram markup
//!
//! A parser scans raw diagram text and records what it recognizes into a
//! graph store. Text it does not recognize is skipped, never rejected.

use anyhow::Result;

/// Core trait for diagram parsers
///
/// # Example
/// ```
/// use mmd_outline::core::Parser;
/// use mmd_outline::outline::{DiagramGraph, DiagramGraphParser};
///
/// let parser = DiagramGraphParser::new();
/// let mut graph = DiagramGraph::new();
/// parser.parse("A --> B", &mut graph).unwrap();
/// assert_eq!(graph.node_count(), 2);
/// ```
pub trait Parser<G>: Send + Sync {
    /// Parse diagram markup into the provided graph
    fn parse(&self, input: &str, graph: &mut G) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Check whether the input contains anything this parser recognizes
    fn can_parse(&self, input: &str) -> bool;
}

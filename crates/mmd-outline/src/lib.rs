//! mmd-outline - Derive structured outlines from Mermaid-style diagrams
//!
//! A library that extracts labelled nodes and arrows from diagram source
//! text, builds a cycle-free forest from them and formats that forest as a
//! readable outline. A session layer memoizes outlines per diagram and
//! builds a combined report across a whole diagram catalog.
//!
//! # Quick Start
//!
//! ```rust
//! use mmd_outline::outline;
//!
//! let text = "A[\"Home\"]\nB[\"About\"]\nA-->B";
//! assert_eq!(outline(text).unwrap(), "Page: Home\n- About");
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual stages:
//!
//! ```rust
//! use mmd_outline::prelude::*;
//!
//! let text = "S[\"Site\"]\nP[\"Home\\n5 PDFs\"]\nS-->P";
//!
//! // Extract the graph
//! let parser = DiagramGraphParser::new();
//! let mut graph = DiagramGraph::new();
//! parser.parse(text, &mut graph).unwrap();
//! assert_eq!(graph.roots(), vec!["S"]);
//!
//! // Build the forest and format it as a sitemap
//! let forest = TreeBuilder::new().build(&graph);
//! let outline = SitemapFormatter::new().format(&forest);
//! assert_eq!(outline, "Page: Site\n- Home\n5 PDFs");
//! ```

pub mod core;
pub mod outline;
pub mod session;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        DiagramSource, Forest, OutlineError, OutlineFormatter, OutlineNode, OutlineStyle, Parser,
    };
    pub use crate::outline::{
        derive_outline, DiagramGraph, DiagramGraphParser, GenericFormatter, SitemapFormatter,
        TreeBuilder,
    };
    pub use crate::session::{
        AggregateStatus, Catalog, FsSourceProvider, MemorySourceProvider, OutlineSession,
        SourceProvider, ViewerState,
    };
}

/// Derive a generic outline from diagram source text
///
/// Returns an empty string when the text has no zero-indegree roots.
///
/// # Example
/// ```rust
/// use mmd_outline::outline;
///
/// // A single cycle has no roots
/// assert_eq!(outline("A-->B\nB-->A").unwrap(), "");
/// ```
pub fn outline(text: &str) -> anyhow::Result<String> {
    outline::derive_outline_with_style(text, OutlineStyle::Generic)
}

/// Derive an outline with an explicit formatting style
///
/// # Example
/// ```rust
/// use mmd_outline::{outline_with_style, OutlineStyle};
///
/// let text = "S[\"Site\"]\nP[\"Home\\n2 Maps\"]\nS-->P";
/// let sitemap = outline_with_style(text, OutlineStyle::Sitemap).unwrap();
/// assert_eq!(sitemap, "Page: Site\n- Home\n2 Maps");
/// ```
pub fn outline_with_style(text: &str, style: OutlineStyle) -> anyhow::Result<String> {
    outline::derive_outline_with_style(text, style)
}

/// Parse diagram source text into its graph without formatting
pub fn parse(text: &str) -> anyhow::Result<outline::DiagramGraph> {
    outline::extract_graph(text)
}

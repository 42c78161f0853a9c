//! Text-to-outline pipeline: parse → build forest → format
//!
//! `derive_outline` is pure for fixed inputs; memoization lives in
//! [`crate::session::OutlineCache`].

use anyhow::Result;
use tracing::{debug, span, Level};

use super::{format_forest, DiagramGraph, DiagramGraphParser, TreeBuilder};
use crate::core::{DiagramSource, Forest, OutlineStyle, Parser};

/// Parse raw diagram text into its graph
pub fn extract_graph(text: &str) -> Result<DiagramGraph> {
    let mut graph = DiagramGraph::new();
    DiagramGraphParser::new().parse(text, &mut graph)?;
    Ok(graph)
}

/// Parse raw diagram text and build its forest
pub fn build_forest(text: &str) -> Result<Forest> {
    let graph = extract_graph(text)?;
    Ok(TreeBuilder::new().build(&graph))
}

/// Derive the outline text for one diagram's source
///
/// The formatting style follows the diagram's identity. An empty string means
/// no outline is available.
pub fn derive_outline(diagram: &DiagramSource, text: &str) -> Result<String> {
    derive_outline_with_style(text, OutlineStyle::for_diagram(diagram))
}

/// Derive outline text with an explicit formatting style
pub fn derive_outline_with_style(text: &str, style: OutlineStyle) -> Result<String> {
    let derive_span = span!(
        Level::DEBUG,
        "derive_outline",
        input_len = text.len(),
        style = %style
    );
    let _enter = derive_span.enter();

    let forest = build_forest(text)?;
    if forest.is_empty() {
        debug!("No zero-indegree roots, outline is empty");
        return Ok(String::new());
    }

    let outline = format_forest(&forest, style);
    debug!(outline_len = outline.len(), "Outline derived");
    Ok(outline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_pipeline() {
        let diagram = DiagramSource::new("pages-home-mmd");
        let outline = derive_outline(&diagram, "A[\"Home\"]\nB[\"About\"]\nA-->B").unwrap();
        assert_eq!(outline, "Page: Home\n- About");
    }

    #[test]
    fn test_sitemap_pipeline() {
        let diagram = DiagramSource::new("sitemap-mmd");
        let text = "S[\"Site\"]\nP[\"Home\\n5 PDFs\"]\nS-->P";
        assert_eq!(
            derive_outline(&diagram, text).unwrap(),
            "Page: Site\n- Home\n5 PDFs"
        );
    }

    #[test]
    fn test_no_matches_is_empty() {
        let diagram = DiagramSource::new("notes");
        assert_eq!(derive_outline(&diagram, "just prose, no graph").unwrap(), "");
    }

    #[test]
    fn test_build_forest() {
        let forest = build_forest("A-->B\nA-->C").unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].children.len(), 2);
    }

    fn long_chain(len: usize) -> String {
        (0..len).map(|i| format!("n{}-->n{}\n", i, i + 1)).collect()
    }

    #[test]
    fn test_long_chain_forest() {
        let forest = build_forest(&long_chain(100_000)).unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].label, "n0");
        assert_eq!(forest[0].size(), 100_001);
        drop(forest);
    }

    #[test]
    fn test_long_chain_sitemap_outline() {
        let diagram = DiagramSource::new("sitemap-mmd");
        let outline = derive_outline(&diagram, &long_chain(100_000)).unwrap();
        assert_eq!(outline, "Page: n0\n- n1");
    }
}

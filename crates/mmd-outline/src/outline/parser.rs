//! Diagram graph parser
//!
//! Tokenizes each line with [`StatementGrammar`], then runs two independent
//! scans over the recognized statements: node declarations first, edges
//! second. Both scans are linear in the length of the text.

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::grammar::{Statement, StatementGrammar};
use super::DiagramGraph;
use crate::core::Parser;

/// Extracts a [`DiagramGraph`] from raw diagram text
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagramGraphParser {
    grammar: StatementGrammar,
}

impl DiagramGraphParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience wrapper returning a fresh graph
    pub fn extract(&self, input: &str) -> DiagramGraph {
        let mut graph = DiagramGraph::new();
        let statements = self.grammar.parse_statements(input);
        scan_declarations(&statements, &mut graph);
        scan_edges(&statements, &mut graph);
        graph
    }
}

impl Parser<DiagramGraph> for DiagramGraphParser {
    fn parse(&self, input: &str, graph: &mut DiagramGraph) -> Result<()> {
        let parse_span = span!(Level::DEBUG, "parse_graph", input_len = input.len());
        let _enter = parse_span.enter();

        let statements = self.grammar.parse_statements(input);
        trace!(statement_count = statements.len(), "Tokenized statements");

        scan_declarations(&statements, graph);
        scan_edges(&statements, graph);

        debug!(
            node_count = graph.node_count(),
            edge_count = graph.edge_count(),
            "Graph extracted"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mermaid-graph"
    }

    fn can_parse(&self, input: &str) -> bool {
        self.grammar
            .parse_statements(input)
            .iter()
            .any(|statement| statement.declarations().next().is_some() || !statement.links.is_empty())
    }
}

/// First scan: every labelled endpoint declares its node
fn scan_declarations(statements: &[Statement], graph: &mut DiagramGraph) {
    for (id, label) in statements.iter().flat_map(Statement::declarations) {
        graph.declare_node(id, label);
    }
}

/// Second scan: every arrow between two endpoints is an edge
fn scan_edges(statements: &[Statement], graph: &mut DiagramGraph) {
    for (parent, child) in statements.iter().flat_map(Statement::edges) {
        graph.add_edge(parent, child);
    }
}

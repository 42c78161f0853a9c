//! Forest construction from an extracted graph
//!
//! Roots are the zero-indegree nodes in discovery order. Each root is
//! expanded depth-first with an explicit stack; the set of ids on the current
//! path travels with the stack, so a child already on the path (a cycle edge)
//! is skipped while the same node may still appear under other branches.
//!
//! Nodes with nonzero indegree that no root reaches are not emitted at all.

use std::collections::HashSet;

use tracing::{debug, span, trace, Level};

use super::DiagramGraph;
use crate::core::{Forest, OutlineNode};

/// Builds an ordered, cycle-free [`Forest`] from a [`DiagramGraph`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder;

/// One node being expanded: its partial output and the next child to visit
struct Frame<'g> {
    id: &'g str,
    node: OutlineNode,
    next_child: usize,
}

impl<'g> Frame<'g> {
    fn new(graph: &'g DiagramGraph, id: &'g str) -> Self {
        Self {
            id,
            node: OutlineNode::new(graph.label(id).unwrap_or(id)),
            next_child: 0,
        }
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build one tree per root
    pub fn build(&self, graph: &DiagramGraph) -> Forest {
        let build_span = span!(Level::DEBUG, "build_forest", node_count = graph.node_count());
        let _enter = build_span.enter();

        let roots = graph.roots();
        trace!(root_count = roots.len(), "Collected roots");

        let forest: Forest = roots
            .into_iter()
            .map(|root| Self::build_tree(graph, root))
            .collect();

        debug!(
            tree_count = forest.len(),
            emitted = forest.iter().map(OutlineNode::size).sum::<usize>(),
            "Forest built"
        );
        forest
    }

    fn build_tree<'g>(graph: &'g DiagramGraph, root: &'g str) -> OutlineNode {
        let mut active_path: HashSet<&'g str> = HashSet::from([root]);
        let mut root_frame = Frame::new(graph, root);
        let mut stack: Vec<Frame<'g>> = Vec::new();

        loop {
            let top = match stack.last_mut() {
                Some(frame) => frame,
                None => &mut root_frame,
            };
            let next = graph.children(top.id).get(top.next_child).map(String::as_str);
            top.next_child += 1;

            match next {
                Some(child) if active_path.contains(child) => {
                    trace!(child, "Dropping cycle edge");
                }
                Some(child) => {
                    active_path.insert(child);
                    stack.push(Frame::new(graph, child));
                }
                None => match stack.pop() {
                    Some(finished) => {
                        active_path.remove(finished.id);
                        let parent = match stack.last_mut() {
                            Some(frame) => frame,
                            None => &mut root_frame,
                        };
                        parent.node.children.push(finished.node);
                    }
                    None => return root_frame.node,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(nodes: &[OutlineNode]) -> Vec<&str> {
        nodes.iter().map(|node| node.label.as_str()).collect()
    }

    #[test]
    fn test_single_edge() {
        let mut graph = DiagramGraph::new();
        graph.declare_node("A", "Home");
        graph.declare_node("B", "About");
        graph.add_edge("A", "B");

        let forest = TreeBuilder::new().build(&graph);
        assert_eq!(labels(&forest), vec!["Home"]);
        assert_eq!(labels(&forest[0].children), vec!["About"]);
    }

    #[test]
    fn test_cycle_edge_dropped() {
        let mut graph = DiagramGraph::new();
        graph.add_edge("R", "A");
        graph.add_edge("A", "B");
        graph.add_edge("B", "A");

        let forest = TreeBuilder::new().build(&graph);
        assert_eq!(forest.len(), 1);
        let a = &forest[0].children[0];
        assert_eq!(a.label, "A");
        assert_eq!(labels(&a.children), vec!["B"]);
        assert!(a.children[0].children.is_empty());
    }

    #[test]
    fn test_shared_descendant_appears_under_each_parent() {
        let mut graph = DiagramGraph::new();
        graph.add_edge("R", "A");
        graph.add_edge("R", "B");
        graph.add_edge("A", "S");
        graph.add_edge("B", "S");

        let forest = TreeBuilder::new().build(&graph);
        let root = &forest[0];
        assert_eq!(labels(&root.children[0].children), vec!["S"]);
        assert_eq!(labels(&root.children[1].children), vec!["S"]);
    }

    #[test]
    fn test_duplicate_edges_repeat_child() {
        let mut graph = DiagramGraph::new();
        graph.add_edge("R", "A");
        graph.add_edge("R", "A");

        let forest = TreeBuilder::new().build(&graph);
        assert_eq!(labels(&forest[0].children), vec!["A", "A"]);
    }

    #[test]
    fn test_unreachable_nonzero_indegree_nodes_are_dropped() {
        let mut graph = DiagramGraph::new();
        graph.add_edge("R", "A");
        graph.add_edge("X", "Y");
        graph.add_edge("Y", "X");

        let forest = TreeBuilder::new().build(&graph);
        assert_eq!(labels(&forest), vec!["R"]);
        assert_eq!(forest.iter().map(OutlineNode::size).sum::<usize>(), 2);
    }

    #[test]
    fn test_pure_cycle_yields_empty_forest() {
        let mut graph = DiagramGraph::new();
        graph.add_edge("A", "B");
        graph.add_edge("B", "A");

        assert!(TreeBuilder::new().build(&graph).is_empty());
    }

    #[test]
    fn test_roots_in_discovery_order() {
        let mut graph = DiagramGraph::new();
        graph.declare_node("Z", "Zed");
        graph.declare_node("A", "Ay");
        graph.add_edge("M", "A");

        // A gained an incoming edge; Z came first, M was appended by the edge scan
        let forest = TreeBuilder::new().build(&graph);
        assert_eq!(labels(&forest), vec!["Zed", "M"]);
    }

    #[test]
    fn test_long_chain() {
        let mut graph = DiagramGraph::new();
        let ids: Vec<String> = (0..1_000).map(|i| format!("n{}", i)).collect();
        for pair in ids.windows(2) {
            graph.add_edge(&pair[0], &pair[1]);
        }

        let forest = TreeBuilder::new().build(&graph);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].size(), 1_000);
    }
}

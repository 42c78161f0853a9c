//! Property tests for graph extraction and forest construction

use std::collections::HashSet;

use mmd_outline::outline::{extract_graph, TreeBuilder};
use mmd_outline::{outline, OutlineNode};
use proptest::prelude::*;

fn edge_text(edges: &[(u8, u8)]) -> String {
    edges
        .iter()
        .map(|(parent, child)| format!("N{}-->N{}", parent, child))
        .collect::<Vec<_>>()
        .join("\n")
}

/// True when no label repeats along any root-to-leaf path
fn paths_are_acyclic(node: &OutlineNode, path: &mut HashSet<String>) -> bool {
    if !path.insert(node.label.clone()) {
        return false;
    }
    let ok = node
        .children
        .iter()
        .all(|child| paths_are_acyclic(child, path));
    path.remove(&node.label);
    ok
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_extraction_is_deterministic(input in ".{0,256}") {
        let first = extract_graph(&input).unwrap();
        let second = extract_graph(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_outline_is_total(input in "[A-Za-z0-9_\\[\\]\" \\-.=>\n]{0,200}") {
        let first = outline(&input).unwrap();
        let second = outline(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_forest_breaks_every_cycle(edges in prop::collection::vec((0u8..6, 0u8..6), 0..24)) {
        let graph = extract_graph(&edge_text(&edges)).unwrap();
        let forest = TreeBuilder::new().build(&graph);

        for root in &forest {
            prop_assert!(paths_are_acyclic(root, &mut HashSet::new()));
        }
    }

    #[test]
    fn prop_roots_are_zero_indegree_nodes(edges in prop::collection::vec((0u8..6, 0u8..6), 0..24)) {
        let graph = extract_graph(&edge_text(&edges)).unwrap();
        let forest = TreeBuilder::new().build(&graph);

        let root_labels: Vec<&str> = forest.iter().map(|node| node.label.as_str()).collect();
        prop_assert_eq!(root_labels, graph.roots());
        prop_assert_eq!(graph.edge_count(), edges.len());
    }
}

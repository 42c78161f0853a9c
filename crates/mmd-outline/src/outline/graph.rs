//! Extracted diagram graph
//!
//! Holds the three maps the parser produces (labels, ordered children,
//! indegrees) plus the first-discovery order of node ids.

use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::trace;

/// Label map, child adjacency and indegrees of one diagram
///
/// Node ids are unique; every id that appears anywhere has a label (its own
/// id when never declared) and an indegree entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramGraph {
    /// Labels indexed by node id
    labels: HashMap<String, String>,
    /// Child ids per parent, in edge order, duplicates retained
    children: HashMap<String, Vec<String>>,
    /// Number of incoming edges per node id
    indegree: HashMap<String, usize>,
    /// Node ids in first-discovery order
    order: Vec<String>,
    /// Total number of recorded edges
    edge_count: usize,
}

impl DiagramGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a node declaration
    ///
    /// A repeated declaration replaces the label but keeps the node's
    /// discovery position and indegree.
    pub fn declare_node(&mut self, id: &str, label: &str) {
        trace!(id, label, "Declaring node");
        if self.labels.insert(id.to_string(), label.to_string()).is_none() {
            self.order.push(id.to_string());
        }
        self.indegree.entry(id.to_string()).or_insert(0);
    }

    /// Record a directed edge from `parent` to `child`
    pub fn add_edge(&mut self, parent: &str, child: &str) {
        trace!(parent, child, "Adding edge");
        self.ensure_label(parent);
        self.ensure_label(child);

        self.children
            .entry(parent.to_string())
            .or_default()
            .push(child.to_string());
        *self.indegree.entry(child.to_string()).or_insert(0) += 1;
        self.indegree.entry(parent.to_string()).or_insert(0);
        self.edge_count += 1;
    }

    fn ensure_label(&mut self, id: &str) {
        if !self.labels.contains_key(id) {
            self.labels.insert(id.to_string(), id.to_string());
            self.order.push(id.to_string());
        }
    }

    /// Check if a node exists
    pub fn has_node(&self, id: &str) -> bool {
        self.labels.contains_key(id)
    }

    /// Label of a node
    pub fn label(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// Ordered child ids of a node (empty for leaves and unknown ids)
    pub fn children(&self, id: &str) -> &[String] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of incoming edges of a node
    pub fn indegree(&self, id: &str) -> usize {
        self.indegree.get(id).copied().unwrap_or(0)
    }

    /// Node ids in first-discovery order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Zero-indegree node ids in first-discovery order
    pub fn roots(&self) -> Vec<&str> {
        self.node_ids().filter(|id| self.indegree(id) == 0).collect()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Get the number of edges, duplicates included
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Clear all data from the graph
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Ordered JSON view: one object per node in discovery order
    pub fn to_json(&self) -> Value {
        let nodes: Vec<Value> = self
            .node_ids()
            .map(|id| {
                json!({
                    "id": id,
                    "label": self.label(id),
                    "indegree": self.indegree(id),
                    "children": self.children(id),
                })
            })
            .collect();

        json!({
            "nodes": nodes,
            "roots": self.roots(),
            "node_count": self.node_count(),
            "edge_count": self.edge_count(),
        })
    }
}

//! Shared data model: diagram identity, outline trees and formatting style

use serde::{Deserialize, Serialize};

/// Id of the distinguished sitemap diagram
pub const SITEMAP_DIAGRAM_ID: &str = "sitemap-mmd";

/// Source-path suffix that also marks the sitemap diagram (case-insensitive)
pub const SITEMAP_SOURCE_SUFFIX: &str = "sitemap.mmd";

/// Identity of one diagram in the catalog
///
/// The raw text is not part of the identity; it is fetched lazily through a
/// [`crate::session::SourceProvider`] using [`DiagramSource::file`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramSource {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_path: Option<String>,
    /// Storage path handed to the source provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DiagramSource {
    /// Create a diagram identity whose name defaults to its id
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_source_path(mut self, source_path: impl Into<String>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    pub fn with_display_path(mut self, display_path: impl Into<String>) -> Self {
        self.display_path = Some(display_path.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Category shown in reports, `Diagram` when none is set
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or("Diagram")
    }

    /// Display path when present and non-empty
    pub fn display_path(&self) -> Option<&str> {
        self.display_path.as_deref().filter(|path| !path.is_empty())
    }
}

/// One node of a derived outline tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineNode {
    pub label: String,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<OutlineNode>) -> Self {
        self.children = children;
        self
    }

    /// Number of nodes in this subtree, including itself
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(&node.children);
        }
        count
    }

    /// Length of the longest root-to-leaf path, counted in nodes
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            pending.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }
}

// Chains can be arbitrarily long, so subtrees are unlinked onto a work list
// instead of being dropped recursively.
impl Drop for OutlineNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Ordered roots of a derived outline
pub type Forest = Vec<OutlineNode>;

/// Outline formatting strategy selected from a diagram's identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutlineStyle {
    /// `Page:` per root, nested `- ` items indented by depth
    #[default]
    Generic,
    /// Single root, direct children flattened into stat blocks
    Sitemap,
}

impl OutlineStyle {
    /// Pick the style for a diagram: the sitemap diagram is matched by id or
    /// by a case-insensitive `sitemap.mmd` source-path suffix
    pub fn for_diagram(diagram: &DiagramSource) -> Self {
        let by_path = diagram
            .source_path
            .as_deref()
            .map(|path| path.to_lowercase().ends_with(SITEMAP_SOURCE_SUFFIX))
            .unwrap_or(false);

        if diagram.id == SITEMAP_DIAGRAM_ID || by_path {
            OutlineStyle::Sitemap
        } else {
            OutlineStyle::Generic
        }
    }
}

impl std::fmt::Display for OutlineStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutlineStyle::Generic => write!(f, "generic"),
            OutlineStyle::Sitemap => write!(f, "sitemap"),
        }
    }
}

//! Diagram listing loaded from the manifest
//!
//! The listing order is the order the aggregate report follows. The first
//! entry that looks like a site map is promoted to the front.

use std::path::Path;

use tracing::debug;

use crate::core::{DiagramSource, OutlineError, Result};

/// Id of the synthetic aggregate overview entry
pub const AGGREGATE_VIEW_ID: &str = "structured-outline-overview";

/// Fixed category order; unknown categories follow in first-seen order
pub const CATEGORY_ORDER: [&str; 7] = [
    "Overview",
    "Home & Index",
    "Maps",
    "Places Index",
    "Timetables",
    "Pages",
    "Other",
];

/// Ordered diagram listing plus the synthetic aggregate entry
#[derive(Debug, Clone)]
pub struct Catalog {
    diagrams: Vec<DiagramSource>,
    aggregate: DiagramSource,
}

impl Catalog {
    pub fn new(entries: Vec<DiagramSource>) -> Self {
        let mut diagrams = entries;
        if let Some(index) = diagrams.iter().position(is_sitemap_entry) {
            let sitemap = diagrams.remove(index);
            debug!(id = %sitemap.id, from = index, "Promoting sitemap diagram to the front");
            diagrams.insert(0, sitemap);
        }

        for diagram in diagrams.iter_mut().filter(|d| d.name.is_empty()) {
            diagram.name = diagram.id.clone();
        }

        Self {
            diagrams,
            aggregate: aggregate_entry(),
        }
    }

    /// Parse a JSON array of manifest entries
    pub fn from_json(text: &str) -> Result<Self> {
        let entries: Vec<DiagramSource> =
            serde_json::from_str(text).map_err(|e| OutlineError::manifest_error(e.to_string()))?;
        Ok(Self::new(entries))
    }

    /// Read and parse a manifest file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Real diagrams in aggregation order
    pub fn diagrams(&self) -> &[DiagramSource] {
        &self.diagrams
    }

    pub fn aggregate_entry(&self) -> &DiagramSource {
        &self.aggregate
    }

    /// Aggregate entry followed by every real diagram, as a consumer lists them
    pub fn entries(&self) -> impl Iterator<Item = &DiagramSource> {
        std::iter::once(&self.aggregate).chain(self.diagrams.iter())
    }

    /// Resolve a real diagram or the aggregate entry by id
    pub fn find(&self, id: &str) -> Option<&DiagramSource> {
        self.entries().find(|diagram| diagram.id == id)
    }

    /// First real diagram, the one a consumer opens by default
    pub fn default_diagram(&self) -> Option<&DiagramSource> {
        self.diagrams.first()
    }

    pub fn is_aggregate(&self, id: &str) -> bool {
        id == AGGREGATE_VIEW_ID
    }

    pub fn len(&self) -> usize {
        self.diagrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagrams.is_empty()
    }

    /// Distinct categories of every entry, in display order
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for category in self.entries().filter_map(|d| d.category.as_deref()) {
            if !category.is_empty() && !categories.iter().any(|c| c == category) {
                categories.push(category.to_string());
            }
        }

        // Stable sort keeps unknown categories in first-seen order
        categories.sort_by_key(|category| {
            CATEGORY_ORDER
                .iter()
                .position(|known| known == category)
                .unwrap_or(usize::MAX)
        });
        categories
    }
}

fn is_sitemap_entry(diagram: &DiagramSource) -> bool {
    let source_path = diagram.source_path.as_deref().unwrap_or("");
    format!("{} {}", source_path, diagram.name)
        .to_lowercase()
        .contains("sitemap")
}

fn aggregate_entry() -> DiagramSource {
    DiagramSource {
        id: AGGREGATE_VIEW_ID.to_string(),
        name: "Structured outline overview".to_string(),
        display_path: Some("All diagrams".to_string()),
        category: Some("Overview".to_string()),
        description: Some(
            "Combined structured outline data from every Mermaid diagram.".to_string(),
        ),
        ..Default::default()
    }
}

//! Headless model of what the consumer UI displays

use serde::Serialize;

pub const DERIVING_OUTLINE: &str = "Deriving outline…";
pub const LOADING_SOURCE: &str = "Loading…";
pub const NO_OUTLINE: &str = "No outline data detected in this diagram.";
pub const OUTLINE_FAILED: &str = "Unable to derive outline for this diagram.";
pub const MISSING_DIAGRAM_FILE: &str = "Diagram source path missing for this entry.";
pub const BUILDING_OVERVIEW: &str = "Building outline overview…";
pub const NO_AGGREGATE_OUTLINE: &str = "No outline data detected yet.";
pub const AGGREGATE_FAILED: &str = "Unable to build the outline overview.";

/// Outline text shown to the user and whether it may be copied
///
/// Placeholders and status messages are never copyable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OutlinePanel {
    pub text: String,
    pub copy_available: bool,
}

impl OutlinePanel {
    /// Status text that is not outline content
    pub fn message(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            copy_available: false,
        }
    }

    /// Outline content, or `empty_message` when there is none
    pub fn from_outline(outline: &str, empty_message: &str) -> Self {
        if outline.is_empty() {
            Self::message(empty_message)
        } else {
            Self {
                text: outline.to_string(),
                copy_available: true,
            }
        }
    }
}

/// Snapshot of the consumer-facing state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ViewerState {
    pub active_id: Option<String>,
    pub loading: bool,
    /// Raw source of the selected diagram
    pub source: String,
    /// Output of the rendering backend, when one is attached
    pub rendered: Option<String>,
    /// Status or failure text for the diagram stage
    pub diagram_message: Option<String>,
    pub structure: OutlinePanel,
    pub aggregate: OutlinePanel,
}

impl ViewerState {
    pub fn is_active(&self, id: &str) -> bool {
        self.active_id.as_deref() == Some(id)
    }

    /// Reset the single-diagram fields for a new selection
    pub(crate) fn begin_diagram(&mut self, id: &str) {
        self.active_id = Some(id.to_string());
        self.loading = true;
        self.source = LOADING_SOURCE.to_string();
        self.rendered = None;
        self.diagram_message = None;
        self.structure = OutlinePanel::message(DERIVING_OUTLINE);
    }

    /// Reset the single-diagram fields for the aggregate view
    pub(crate) fn begin_aggregate(&mut self, id: &str, aggregate: OutlinePanel) {
        self.active_id = Some(id.to_string());
        self.loading = false;
        self.source.clear();
        self.rendered = None;
        self.diagram_message = None;
        self.aggregate = aggregate;
    }
}

//! Core formatter trait for outline output
//!
//! A formatter turns a derived forest into plain outline text.

use super::OutlineNode;

/// Core trait for outline formatters
///
/// Formatting an empty forest yields the empty string, meaning "no outline
/// available".
///
/// # Example
/// ```
/// use mmd_outline::core::{OutlineFormatter, OutlineNode};
/// use mmd_outline::outline::GenericFormatter;
///
/// let forest = vec![OutlineNode::new("Home").with_children(vec![OutlineNode::new("About")])];
/// assert_eq!(GenericFormatter::new().format(&forest), "Page: Home\n- About");
/// ```
pub trait OutlineFormatter: Send + Sync {
    /// Render the forest into outline text
    fn format(&self, forest: &[OutlineNode]) -> String;

    /// Get the name of this formatter
    fn name(&self) -> &'static str;
}

//! Outline formatting strategies
//!
//! [`GenericFormatter`] prints every root as a page with nested bullet items.
//! [`SitemapFormatter`] prints the single sitemap root and flattens each
//! direct child into a stat block, expanding literal `\n` escapes in labels.

use tracing::trace;

use crate::core::{OutlineFormatter, OutlineNode, OutlineStyle};

/// `Page: {root}` followed by `- {label}` items indented two spaces per level
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericFormatter;

impl GenericFormatter {
    pub fn new() -> Self {
        Self
    }

    fn append_children(children: &[OutlineNode], lines: &mut Vec<String>) {
        let mut pending: Vec<(&OutlineNode, usize)> =
            children.iter().rev().map(|child| (child, 0)).collect();
        while let Some((node, depth)) = pending.pop() {
            lines.push(format!("{}- {}", "  ".repeat(depth), node.label));
            pending.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
    }
}

impl OutlineFormatter for GenericFormatter {
    fn format(&self, forest: &[OutlineNode]) -> String {
        let mut lines = Vec::new();
        for (index, root) in forest.iter().enumerate() {
            lines.push(format!("Page: {}", root.label));
            Self::append_children(&root.children, &mut lines);
            if index + 1 < forest.len() {
                lines.push(String::new());
            }
        }
        trace!(line_count = lines.len(), "Formatted generic outline");
        lines.join("\n")
    }

    fn name(&self) -> &'static str {
        "generic"
    }
}

/// Replace every literal two-character `\n` escape with a line break
pub fn expand_line_escapes(text: &str) -> String {
    text.replace("\\n", "\n")
}

/// Split a sitemap label into its trimmed first line and the trimmed,
/// non-blank lines after it
pub fn split_stat_block(label: &str) -> (String, Vec<String>) {
    let expanded = expand_line_escapes(label);
    let mut segments = expanded.split('\n');
    let primary = segments.next().unwrap_or_default().trim().to_string();
    let stats = segments
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();
    (primary, stats)
}

/// Single-root sitemap outline with stat blocks for direct children
#[derive(Debug, Clone, Copy, Default)]
pub struct SitemapFormatter;

impl SitemapFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutlineFormatter for SitemapFormatter {
    fn format(&self, forest: &[OutlineNode]) -> String {
        let Some(root) = forest.first() else {
            return String::new();
        };

        let mut lines = vec![format!("Page: {}", expand_line_escapes(&root.label))];
        for (index, child) in root.children.iter().enumerate() {
            let (primary, stats) = split_stat_block(&child.label);
            lines.push(format!("- {}", primary));
            lines.extend(stats);
            if index + 1 < root.children.len() {
                lines.push(String::new());
            }
        }
        trace!(line_count = lines.len(), "Formatted sitemap outline");
        lines.join("\n")
    }

    fn name(&self) -> &'static str {
        "sitemap"
    }
}

/// Format a forest with the strategy for `style`
pub fn format_forest(forest: &[OutlineNode], style: OutlineStyle) -> String {
    match style {
        OutlineStyle::Generic => GenericFormatter::new().format(forest),
        OutlineStyle::Sitemap => SitemapFormatter::new().format(forest),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(label: &str, children: Vec<OutlineNode>) -> OutlineNode {
        OutlineNode::new(label).with_children(children)
    }

    #[test]
    fn test_generic_nested_indentation() {
        let forest = vec![node(
            "Home",
            vec![
                node("Maps", vec![node("Route 1", vec![node("Stop", vec![])])]),
                node("About", vec![]),
            ],
        )];
        assert_eq!(
            GenericFormatter::new().format(&forest),
            "Page: Home\n- Maps\n  - Route 1\n    - Stop\n- About"
        );
    }

    #[test]
    fn test_generic_blank_line_between_roots_only() {
        let forest = vec![node("One", vec![node("a", vec![])]), node("Two", vec![])];
        assert_eq!(
            GenericFormatter::new().format(&forest),
            "Page: One\n- a\n\nPage: Two"
        );
    }

    #[test]
    fn test_generic_keeps_escapes_literal() {
        let forest = vec![node(r"Home\nStats", vec![])];
        assert_eq!(GenericFormatter::new().format(&forest), r"Page: Home\nStats");
    }

    #[test]
    fn test_empty_forest_is_empty_outline() {
        assert_eq!(GenericFormatter::new().format(&[]), "");
        assert_eq!(SitemapFormatter::new().format(&[]), "");
    }

    #[test]
    fn test_sitemap_stat_blocks() {
        let forest = vec![node(
            "Site",
            vec![
                node(r"Home\n5 PDFs\n2 Maps", vec![node("ignored", vec![])]),
                node(r"Times\n  \n 12 tables ", vec![]),
            ],
        )];
        assert_eq!(
            SitemapFormatter::new().format(&forest),
            "Page: Site\n- Home\n5 PDFs\n2 Maps\n\n- Times\n12 tables"
        );
    }

    #[test]
    fn test_sitemap_root_label_expanded() {
        let forest = vec![node(r"Site\nv2", vec![])];
        assert_eq!(SitemapFormatter::new().format(&forest), "Page: Site\nv2");
    }

    #[test]
    fn test_sitemap_uses_first_root_only() {
        let forest = vec![node("Site", vec![]), node("Stray", vec![node("x", vec![])])];
        assert_eq!(SitemapFormatter::new().format(&forest), "Page: Site");
    }

    #[test]
    fn test_split_stat_block() {
        let (primary, stats) = split_stat_block(r" Home \n 5 PDFs");
        assert_eq!(primary, "Home");
        assert_eq!(stats, vec!["5 PDFs".to_string()]);
    }

    #[test]
    fn test_format_forest_dispatch() {
        let forest = vec![node("Site", vec![node(r"A\nB", vec![])])];
        assert_eq!(
            format_forest(&forest, OutlineStyle::Generic),
            "Page: Site\n- A\\nB"
        );
        assert_eq!(format_forest(&forest, OutlineStyle::Sitemap), "Page: Site\n- A\nB");
    }

    #[test]
    fn test_generic_deep_chain() {
        let mut chain = node("last", vec![]);
        for i in (0..5_000).rev() {
            chain = node(&format!("n{}", i), vec![chain]);
        }
        let outline = GenericFormatter::new().format(&[chain]);
        let lines: Vec<&str> = outline.lines().collect();
        assert_eq!(lines.len(), 5_001);
        assert_eq!(lines[0], "Page: n0");
        assert_eq!(lines[1], "- n1");
        assert_eq!(lines[2], "  - n2");
        assert_eq!(lines[5_000], format!("{}- last", "  ".repeat(4_999)));
    }
}

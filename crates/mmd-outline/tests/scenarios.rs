//! End-to-end outline scenarios
//!
//! Covers the canonical single-diagram cases, the aggregate report format and
//! memoization observed through call counters.

use std::sync::Arc;

use mmd_outline::prelude::*;
use mmd_outline::session::assemble_report;

#[test]
fn test_single_child_generic_outline() {
    let diagram = DiagramSource::new("pages-home-mmd");
    let text = "A[\"Home\"]\nB[\"About\"]\nA-->B";
    assert_eq!(derive_outline(&diagram, text).unwrap(), "Page: Home\n- About");
}

#[test]
fn test_mutual_cycle_has_no_outline() {
    let text = "A[\"X\"]-->B[\"Y\"]\nB-->A";
    let graph = mmd_outline::parse(text).unwrap();
    assert_eq!(graph.label("A"), Some("X"));
    assert_eq!(graph.label("B"), Some("Y"));
    assert_eq!(graph.indegree("A"), 1);
    assert_eq!(graph.indegree("B"), 1);
    assert!(graph.roots().is_empty());

    let diagram = DiagramSource::new("loop");
    assert_eq!(derive_outline(&diagram, text).unwrap(), "");
}

#[test]
fn test_sitemap_stat_block() {
    let diagram = DiagramSource::new("sitemap-mmd");
    let text = "S[\"Site\"]\nP[\"Home\\n5 PDFs\\n2 Maps\"]\nS-->P";
    assert_eq!(
        derive_outline(&diagram, text).unwrap(),
        "Page: Site\n- Home\n5 PDFs\n2 Maps"
    );
}

#[test]
fn test_aggregate_skips_empty_outline() {
    let first = DiagramSource::new("a").with_name("A");
    let second = DiagramSource::new("b").with_name("B");
    let report = assemble_report(&[(&first, "Page: A".to_string()), (&second, String::new())]);

    assert_eq!(report, "Diagram: A\nCategory: Diagram\n\nPage: A");
    assert!(!report.contains("Diagram: B"));
    assert!(!report.ends_with('\n'));
}

#[tokio::test]
async fn test_aggregate_through_session() {
    let catalog = Catalog::new(vec![
        DiagramSource::new("a").with_name("A").with_file("a.mmd"),
        DiagramSource::new("b").with_name("B").with_file("b.mmd"),
    ]);
    let provider = MemorySourceProvider::new()
        .with_source("a.mmd", "A[\"A\"]")
        .with_source("b.mmd", "X-->Y\nY-->X");
    let session = OutlineSession::new(catalog, Arc::new(provider));

    let report = session.aggregate_outline().await.unwrap();
    assert_eq!(report, "Diagram: A\nCategory: Diagram\n\nPage: A");
}

#[tokio::test]
async fn test_outline_is_idempotent() {
    let catalog = Catalog::new(vec![DiagramSource::new("home").with_file("home.mmd")]);
    let provider = Arc::new(
        MemorySourceProvider::new().with_source("home.mmd", "A[\"Home\"]\nB[\"About\"]\nA-->B"),
    );
    let session = OutlineSession::new(catalog, provider.clone());

    let first = session.outline("home").await.unwrap();
    let second = session.outline("home").await.unwrap();

    assert_eq!(first, "Page: Home\n- About");
    assert_eq!(first, second);
    assert_eq!(provider.fetch_count(), 1);
    assert_eq!(session.cache().derivations(), 1);
}

#[tokio::test]
async fn test_aggregate_reuses_single_view_outlines() {
    let catalog = Catalog::new(vec![
        DiagramSource::new("home").with_name("Home").with_file("home.mmd"),
        DiagramSource::new("maps").with_name("Maps").with_file("maps.mmd"),
    ]);
    let provider = Arc::new(
        MemorySourceProvider::new()
            .with_source("home.mmd", "H[\"Home\"]")
            .with_source("maps.mmd", "M[\"Maps\"]"),
    );
    let session = OutlineSession::new(catalog, provider.clone());

    session.outline("home").await.unwrap();
    session.aggregate_outline().await.unwrap();
    session.aggregate_outline().await.unwrap();

    assert_eq!(provider.fetch_count(), 2);
    assert_eq!(session.cache().derivations(), 2);
    assert_eq!(session.coordinator().builds_started(), 1);
}

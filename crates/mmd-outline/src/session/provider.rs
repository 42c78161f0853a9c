//! External collaborators: diagram source provider and rendering backend

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::{BoxFuture, FutureExt};
use tracing::trace;

use crate::core::{OutlineError, Result};

/// Supplies raw diagram text for a storage path
///
/// A failure is scoped to one diagram and never fatal to the caller.
pub trait SourceProvider: Send + Sync {
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// Renders validated diagram text into a graphic, independently of outlines
pub trait RenderBackend: Send + Sync {
    fn render<'a>(&'a self, diagram_id: &'a str, source: &'a str) -> BoxFuture<'a, Result<String>>;
}

/// Reads diagram sources from files below a root directory
#[derive(Debug, Clone)]
pub struct FsSourceProvider {
    root: PathBuf,
}

impl FsSourceProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl SourceProvider for FsSourceProvider {
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>> {
        async move {
            let full_path = self.root.join(path);
            trace!(path = %full_path.display(), "Reading diagram source");
            tokio::fs::read_to_string(&full_path)
                .await
                .map_err(|e| OutlineError::fetch_failure(path, e.to_string()))
        }
        .boxed()
    }
}

/// In-memory sources keyed by storage path, counting every fetch
#[derive(Debug, Default)]
pub struct MemorySourceProvider {
    sources: HashMap<String, String>,
    fetches: AtomicUsize,
}

impl MemorySourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.sources.insert(path.into(), text.into());
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.sources.insert(path.into(), text.into());
    }

    /// Number of fetch calls served so far, failed ones included
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl SourceProvider for MemorySourceProvider {
    fn fetch<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<String>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .sources
            .get(path)
            .cloned()
            .ok_or_else(|| OutlineError::fetch_failure(path, "not found"));
        futures::future::ready(outcome).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_provider_counts_fetches() {
        let provider = MemorySourceProvider::new().with_source("a.mmd", "A-->B");
        assert_eq!(provider.fetch("a.mmd").await.unwrap(), "A-->B");
        assert!(provider.fetch("missing.mmd").await.is_err());
        assert_eq!(provider.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_fs_provider_reads_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("diagrams")).unwrap();
        std::fs::write(dir.path().join("diagrams/home.mmd"), "A[\"Home\"]").unwrap();

        let provider = FsSourceProvider::new(dir.path());
        assert_eq!(provider.fetch("diagrams/home.mmd").await.unwrap(), "A[\"Home\"]");

        let missing = provider.fetch("diagrams/none.mmd").await.unwrap_err();
        assert!(matches!(missing, OutlineError::FetchFailure { .. }));
    }
}

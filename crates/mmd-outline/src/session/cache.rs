//! Per-diagram outline memoization
//!
//! Each diagram id owns a [`OnceCell`]: the first request fetches and derives,
//! concurrent requests for the same id wait on that same initialization, and
//! every later request reads the stored string. Failures are stored as the
//! empty string so they are not retried for the rest of the session.
//!
//! Raw source text is memoized the same way, so the single-diagram view and
//! the outline share one fetch per diagram. A failed fetch is not memoized.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, error, warn};

use super::SourceProvider;
use crate::core::{DiagramSource, OutlineError, Result};
use crate::outline::derive_outline;

/// Session-wide memo of derived outlines keyed by diagram id
#[derive(Debug, Default)]
pub struct OutlineCache {
    entries: Mutex<HashMap<String, Arc<OnceCell<String>>>>,
    sources: Mutex<HashMap<String, Arc<OnceCell<Arc<str>>>>>,
    derivations: AtomicUsize,
}

impl OutlineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outline of a diagram, fetching its source on first request
    ///
    /// A missing source file or a failed fetch yields (and caches) an empty
    /// outline.
    pub async fn outline(&self, diagram: &DiagramSource, provider: &dyn SourceProvider) -> String {
        let cell = self.cell(&diagram.id).await;
        cell.get_or_init(|| async {
            match self.source(diagram, provider).await {
                Ok(text) => self.derive(diagram, &text),
                Err(e @ OutlineError::MissingSource { .. }) => {
                    warn!(diagram = %diagram.name, error = %e, "Outline treated as empty");
                    String::new()
                }
                Err(e) => {
                    error!(diagram = %diagram.name, error = %e, "Unable to derive outline");
                    String::new()
                }
            }
        })
        .await
        .clone()
    }

    /// Raw source text of a diagram, fetched at most once per success
    pub async fn source(
        &self,
        diagram: &DiagramSource,
        provider: &dyn SourceProvider,
    ) -> Result<Arc<str>> {
        let Some(path) = diagram.file.as_deref() else {
            return Err(OutlineError::missing_source(&diagram.id));
        };

        let cell = {
            let mut sources = self.sources.lock().await;
            Arc::clone(sources.entry(diagram.id.clone()).or_default())
        };
        let text = cell
            .get_or_try_init(|| async {
                let text = provider.fetch(path).await?;
                debug!(diagram = %diagram.id, source_len = text.len(), "Source cached");
                Ok::<Arc<str>, OutlineError>(Arc::from(text))
            })
            .await?;
        Ok(Arc::clone(text))
    }

    /// Outline of a diagram whose source text is already at hand
    pub async fn outline_from_text(&self, diagram: &DiagramSource, text: &str) -> String {
        let cell = self.cell(&diagram.id).await;
        cell.get_or_init(|| async { self.derive(diagram, text) })
            .await
            .clone()
    }

    /// Cached outline, without fetching
    pub async fn get(&self, id: &str) -> Option<String> {
        let entries = self.entries.lock().await;
        entries.get(id).and_then(|cell| cell.get().cloned())
    }

    /// Number of diagrams with a settled outline
    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|cell| cell.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Number of parse-and-format passes performed so far
    pub fn derivations(&self) -> usize {
        self.derivations.load(Ordering::SeqCst)
    }

    async fn cell(&self, id: &str) -> Arc<OnceCell<String>> {
        let mut entries = self.entries.lock().await;
        Arc::clone(entries.entry(id.to_string()).or_default())
    }

    fn derive(&self, diagram: &DiagramSource, text: &str) -> String {
        self.derivations.fetch_add(1, Ordering::SeqCst);
        match derive_outline(diagram, text) {
            Ok(outline) => {
                debug!(diagram = %diagram.id, outline_len = outline.len(), "Outline cached");
                outline
            }
            Err(e) => {
                error!(diagram = %diagram.name, error = %e, "Unable to derive outline");
                String::new()
            }
        }
    }
}

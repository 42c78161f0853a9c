//! Outline session: the context object a host application owns
//!
//! An [`OutlineSession`] holds the catalog, the per-diagram cache, the
//! aggregate coordinator and the generation counters. Every selection runs
//! through it, and every asynchronous continuation checks its generation
//! before touching the [`ViewerState`].

mod aggregate;
mod cache;
mod catalog;
mod provider;
mod token;
mod view;

pub use aggregate::*;
pub use cache::*;
pub use catalog::*;
pub use provider::*;
pub use token::*;
pub use view::*;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, error, info, span, Instrument, Level};

use crate::core::{DiagramSource, OutlineError, Result};

/// Host-owned context for deriving, caching and aggregating outlines
pub struct OutlineSession {
    catalog: Catalog,
    provider: Arc<dyn SourceProvider>,
    backend: Option<Arc<dyn RenderBackend>>,
    cache: Arc<OutlineCache>,
    aggregate: AggregateOutlineCoordinator,
    render_tokens: RenderCancellation,
    aggregate_views: RenderCancellation,
    view: Mutex<ViewerState>,
}

impl OutlineSession {
    pub fn new(catalog: Catalog, provider: Arc<dyn SourceProvider>) -> Self {
        Self {
            catalog,
            provider,
            backend: None,
            cache: Arc::new(OutlineCache::new()),
            aggregate: AggregateOutlineCoordinator::new(),
            render_tokens: RenderCancellation::new(),
            aggregate_views: RenderCancellation::new(),
            view: Mutex::new(ViewerState::default()),
        }
    }

    /// Attach a rendering backend for the single-diagram view
    pub fn with_render_backend(mut self, backend: Arc<dyn RenderBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Diagrams in aggregation order
    pub fn listing(&self) -> &[DiagramSource] {
        self.catalog.diagrams()
    }

    pub fn cache(&self) -> &OutlineCache {
        &self.cache
    }

    pub fn coordinator(&self) -> &AggregateOutlineCoordinator {
        &self.aggregate
    }

    pub async fn aggregate_status(&self) -> AggregateStatus {
        self.aggregate.status().await
    }

    /// Snapshot of the consumer-facing state
    pub async fn view(&self) -> ViewerState {
        self.view.lock().await.clone()
    }

    /// Activate a diagram or the aggregate overview
    ///
    /// The most recent selection wins: continuations of superseded
    /// selections leave the view untouched.
    pub async fn select(&self, id: &str) -> Result<()> {
        if self.catalog.is_aggregate(id) {
            // Invalidate any single-diagram render still in flight
            self.render_tokens.issue();
            return self.show_aggregate().await;
        }

        let diagram = self
            .catalog
            .diagrams()
            .iter()
            .find(|diagram| diagram.id == id)
            .ok_or_else(|| OutlineError::unknown_diagram(id))?;

        self.render_diagram(diagram)
            .instrument(span!(Level::INFO, "select", diagram = %diagram.id))
            .await;
        Ok(())
    }

    /// Cached outline of one diagram, or the report for the aggregate id
    pub async fn outline(&self, id: &str) -> Result<String> {
        if self.catalog.is_aggregate(id) {
            return self.aggregate_outline().await;
        }

        let diagram = self
            .catalog
            .diagrams()
            .iter()
            .find(|diagram| diagram.id == id)
            .ok_or_else(|| OutlineError::unknown_diagram(id))?;
        Ok(self.cache.outline(diagram, self.provider.as_ref()).await)
    }

    /// Combined report over every listed diagram, built at most once at a time
    pub async fn aggregate_outline(&self) -> Result<String> {
        let cache = Arc::clone(&self.cache);
        let provider = Arc::clone(&self.provider);
        let listing = self.catalog.diagrams().to_vec();

        self.aggregate
            .load(move || async move { Ok(build_report(&cache, provider.as_ref(), &listing).await) })
            .await
    }

    async fn render_diagram(&self, diagram: &DiagramSource) {
        let token = self.render_tokens.issue();
        self.view.lock().await.begin_diagram(&diagram.id);

        if diagram.file.is_none() {
            self.apply(&token, |view| {
                view.source.clear();
                view.diagram_message = Some(MISSING_DIAGRAM_FILE.to_string());
                view.structure = OutlinePanel::message(NO_OUTLINE);
                view.loading = false;
            })
            .await;
            return;
        }

        let text = match self.cache.source(diagram, self.provider.as_ref()).await {
            Ok(text) => text,
            Err(e) => {
                error!(diagram = %diagram.name, error = %e, "Unable to load diagram");
                self.apply(&token, |view| {
                    view.source.clear();
                    view.diagram_message = Some(e.to_string());
                    view.structure = OutlinePanel::message(OUTLINE_FAILED);
                    view.loading = false;
                })
                .await;
                return;
            }
        };

        if token.is_superseded() {
            debug!(generation = token.generation(), "Discarding stale source");
            return;
        }

        let outline = self.cache.outline_from_text(diagram, &text).await;
        let applied = self
            .apply(&token, |view| {
                view.structure = OutlinePanel::from_outline(&outline, NO_OUTLINE);
                view.source = text.to_string();
                if self.backend.is_none() {
                    view.loading = false;
                }
            })
            .await;
        if !applied {
            return;
        }

        if let Some(backend) = &self.backend {
            let rendered = backend.render(&diagram.id, &text).await;
            self.apply(&token, |view| {
                match rendered {
                    Ok(output) => view.rendered = Some(output),
                    Err(e) => {
                        error!(diagram = %diagram.name, error = %e, "Rendering failed");
                        view.diagram_message = Some(render_failure_message(e));
                    }
                }
                view.loading = false;
            })
            .await;
        }
    }

    async fn show_aggregate(&self) -> Result<()> {
        let generation = self.aggregate_views.issue();
        let placeholder = match self.aggregate.cached_text().await {
            Some(text) => OutlinePanel::from_outline(&text, NO_AGGREGATE_OUTLINE),
            None => OutlinePanel::message(BUILDING_OVERVIEW),
        };
        self.view
            .lock()
            .await
            .begin_aggregate(AGGREGATE_VIEW_ID, placeholder);

        let outcome = self
            .aggregate_outline()
            .instrument(span!(Level::INFO, "aggregate_view", generation = generation.generation()))
            .await;

        let mut view = self.view.lock().await;
        if generation.is_superseded() || !view.is_active(AGGREGATE_VIEW_ID) {
            debug!(generation = generation.generation(), "Discarding stale aggregate result");
            return Ok(());
        }

        view.aggregate = match outcome {
            Ok(text) => {
                info!(report_len = text.len(), "Aggregate outline shown");
                OutlinePanel::from_outline(&text, NO_AGGREGATE_OUTLINE)
            }
            Err(e) => {
                error!(error = %e, "Unable to build the outline overview");
                OutlinePanel::message(AGGREGATE_FAILED)
            }
        };
        Ok(())
    }

    /// Mutate the view only while `token` is still current
    async fn apply<F>(&self, token: &RenderToken, update: F) -> bool
    where
        F: FnOnce(&mut ViewerState),
    {
        let mut view = self.view.lock().await;
        if token.is_superseded() {
            debug!(generation = token.generation(), "Discarding stale result");
            return false;
        }
        update(&mut view);
        true
    }
}

impl std::fmt::Debug for OutlineSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineSession")
            .field("catalog", &self.catalog)
            .field("cache", &self.cache)
            .field("aggregate", &self.aggregate)
            .finish_non_exhaustive()
    }
}

fn render_failure_message(error: OutlineError) -> String {
    match error {
        OutlineError::RenderFailure { .. } => error.to_string(),
        other => OutlineError::render_failure(other.to_string()).to_string(),
    }
}

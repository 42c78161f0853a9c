//! Single-flight builder for the combined outline report
//!
//! The coordinator moves `Idle → Loading → Ready`, or back to `Idle` when a
//! build fails outright so the next request retries from scratch. While
//! loading, every caller awaits the same shared future.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::{debug, info, span, warn, Instrument, Level};

use super::{OutlineCache, SourceProvider};
use crate::core::{DiagramSource, OutlineError, Result};

type SharedBuild = Shared<BoxFuture<'static, std::result::Result<String, Arc<OutlineError>>>>;

/// Observable coordinator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateStatus {
    Idle,
    Loading,
    Ready,
}

enum BuildState {
    Idle,
    Loading(SharedBuild),
    Ready(String),
}

impl BuildState {
    fn status(&self) -> AggregateStatus {
        match self {
            BuildState::Idle => AggregateStatus::Idle,
            BuildState::Loading(_) => AggregateStatus::Loading,
            BuildState::Ready(_) => AggregateStatus::Ready,
        }
    }
}

/// Owner of the aggregate build state
pub struct AggregateOutlineCoordinator {
    state: Arc<Mutex<BuildState>>,
    builds_started: AtomicUsize,
}

impl AggregateOutlineCoordinator {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(BuildState::Idle)),
            builds_started: AtomicUsize::new(0),
        }
    }

    /// Return the combined report, starting `build` only when idle
    ///
    /// Callers arriving while a build is in flight share its result, and
    /// callers arriving after it settled read the cached text.
    pub async fn load<F, Fut>(&self, build: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>> + Send + 'static,
    {
        let in_flight = {
            let mut state = self.state.lock().await;
            match &*state {
                BuildState::Ready(text) => return Ok(text.clone()),
                BuildState::Loading(shared) => {
                    debug!("Joining in-flight aggregate build");
                    shared.clone()
                }
                BuildState::Idle => {
                    let attempt = self.builds_started.fetch_add(1, Ordering::SeqCst) + 1;
                    info!(attempt, "Starting aggregate outline build");
                    let shared = Self::settle(Arc::clone(&self.state), build())
                        .instrument(span!(Level::INFO, "aggregate_build", attempt))
                        .boxed()
                        .shared();
                    *state = BuildState::Loading(shared.clone());
                    shared
                }
            }
        };

        in_flight.await.map_err(|e| match &*e {
            OutlineError::AggregateBuild { message } => OutlineError::aggregate_build(message.clone()),
            other => OutlineError::aggregate_build(other.to_string()),
        })
    }

    async fn settle<Fut>(
        state: Arc<Mutex<BuildState>>,
        build: Fut,
    ) -> std::result::Result<String, Arc<OutlineError>>
    where
        Fut: Future<Output = Result<String>>,
    {
        let outcome = build.await;
        let mut state = state.lock().await;
        match outcome {
            Ok(text) => {
                info!(report_len = text.len(), "Aggregate outline ready");
                *state = BuildState::Ready(text.clone());
                Ok(text)
            }
            Err(e) => {
                warn!(error = %e, "Aggregate outline build failed, resetting");
                *state = BuildState::Idle;
                Err(Arc::new(e))
            }
        }
    }

    pub async fn status(&self) -> AggregateStatus {
        self.state.lock().await.status()
    }

    /// Settled report text, if any
    pub async fn cached_text(&self) -> Option<String> {
        match &*self.state.lock().await {
            BuildState::Ready(text) => Some(text.clone()),
            _ => None,
        }
    }

    /// Number of fan-out passes started so far
    pub fn builds_started(&self) -> usize {
        self.builds_started.load(Ordering::SeqCst)
    }
}

impl Default for AggregateOutlineCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AggregateOutlineCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregateOutlineCoordinator")
            .field("builds_started", &self.builds_started())
            .finish_non_exhaustive()
    }
}

/// Fetch and derive every diagram concurrently, then assemble the report
///
/// Per-diagram failures contribute an empty outline and never abort the
/// build.
pub async fn build_report(
    cache: &OutlineCache,
    provider: &dyn SourceProvider,
    listing: &[DiagramSource],
) -> String {
    if listing.is_empty() {
        return String::new();
    }

    let outlines = join_all(listing.iter().map(|diagram| cache.outline(diagram, provider))).await;
    let entries: Vec<(&DiagramSource, String)> = listing.iter().zip(outlines).collect();
    assemble_report(&entries)
}

/// Fold outlines into the combined report
///
/// Diagrams with an empty outline contribute nothing. The result is
/// right-trimmed.
pub fn assemble_report(entries: &[(&DiagramSource, String)]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (diagram, outline) in entries.iter().filter(|(_, outline)| !outline.is_empty()) {
        lines.push(format!("Diagram: {}", diagram.name));
        if let Some(path) = diagram.display_path() {
            lines.push(format!("Path: {}", path));
        }
        lines.push(format!("Category: {}", diagram.category_or_default()));
        lines.push(String::new());
        lines.push(outline.clone());
        lines.push(String::new());
    }

    lines.join("\n").trim_end().to_string()
}

//! Generation tokens guarding asynchronous continuations
//!
//! Every new request issues a token by bumping a shared counter. A
//! continuation applies its result only while its token is still current;
//! superseded work is never aborted, its result is simply dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic counter handing out [`RenderToken`]s
#[derive(Debug, Clone, Default)]
pub struct RenderCancellation {
    current: Arc<AtomicU64>,
}

impl RenderCancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, superseding every token issued before it
    pub fn issue(&self) -> RenderToken {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        RenderToken {
            generation,
            current: Arc::clone(&self.current),
        }
    }

    /// Generation of the most recently issued token (0 before any)
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

/// Captured generation of one request
#[derive(Debug, Clone)]
pub struct RenderToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl RenderToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether no newer token has been issued since this one
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    pub fn is_superseded(&self) -> bool {
        !self.is_current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_increase() {
        let counter = RenderCancellation::new();
        assert_eq!(counter.current(), 0);
        let first = counter.issue();
        let second = counter.issue();
        assert_eq!(first.generation(), 1);
        assert_eq!(second.generation(), 2);
        assert_eq!(counter.current(), 2);
    }

    #[test]
    fn test_most_recent_token_wins() {
        let counter = RenderCancellation::new();
        let first = counter.issue();
        assert!(first.is_current());

        let second = counter.issue();
        assert!(first.is_superseded());
        assert!(second.is_current());
    }

    #[test]
    fn test_clones_share_the_counter() {
        let counter = RenderCancellation::new();
        let token = counter.issue();
        counter.clone().issue();
        assert!(token.is_superseded());
    }
}

//! Generation token guard: invalidates stale in-flight searches.
//!
//! Every search session captures a token at start. A token stays current
//! until the next session begins or the component is torn down; every
//! suspension point in the engine compares its token against the live
//! counter and turns into a no-op once superseded. Plain equality on a
//! monotonic counter is sufficient because execution only interleaves,
//! it never runs in parallel.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues session tokens and tracks which generation is current.
#[derive(Debug, Default)]
pub struct GenerationGuard {
    current: AtomicU64,
}

impl GenerationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new session, superseding every previously issued token.
    pub fn begin_session(&self) -> SessionToken<'_> {
        // Relaxed is enough: tokens are only ever compared on one logical
        // thread of interleaved continuations.
        let id = self.current.fetch_add(1, Ordering::Relaxed) + 1;
        SessionToken { guard: self, id }
    }

    /// Bumps the generation without issuing a token, so every in-flight
    /// session is permanently superseded. This is the teardown primitive.
    pub fn retire_all(&self) {
        self.current.fetch_add(1, Ordering::Relaxed);
    }
}

/// Token identifying one search session.
#[derive(Debug, Clone, Copy)]
pub struct SessionToken<'a> {
    guard: &'a GenerationGuard,
    id: u64,
}

impl SessionToken<'_> {
    /// True iff no newer session has been started since this token was
    /// issued.
    pub fn is_current(&self) -> bool {
        self.guard.current.load(Ordering::Relaxed) == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_current() {
        let guard = GenerationGuard::new();
        let token = guard.begin_session();
        assert!(token.is_current());
    }

    #[test]
    fn test_newer_session_supersedes_older() {
        let guard = GenerationGuard::new();
        let first = guard.begin_session();
        let second = guard.begin_session();
        assert!(!first.is_current(), "older token must go stale");
        assert!(second.is_current());
    }

    #[test]
    fn test_retire_all_supersedes_without_issuing() {
        let guard = GenerationGuard::new();
        let token = guard.begin_session();
        guard.retire_all();
        assert!(!token.is_current(), "retired token must never match again");
    }

    #[test]
    fn test_session_after_retire_is_current() {
        let guard = GenerationGuard::new();
        guard.retire_all();
        let token = guard.begin_session();
        assert!(token.is_current());
    }
}

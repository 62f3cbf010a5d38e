//! Persistence context that must be attached before state may change.

use std::sync::atomic::{AtomicBool, Ordering};

/// External facility an owner must be attached to before changing state.
pub trait PersistenceContext: Send + Sync {
    /// Whether the context is still open for writes.
    fn is_live(&self) -> bool;

    fn name(&self) -> &str {
        "persistence"
    }
}

/// Context that stays live until [`close`](InMemoryContext::close) is called.
#[derive(Debug)]
pub struct InMemoryContext {
    name: String,
    live: AtomicBool,
}

impl InMemoryContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            live: AtomicBool::new(true),
        }
    }

    pub fn close(&self) {
        self.live.store(false, Ordering::SeqCst);
    }
}

impl Default for InMemoryContext {
    fn default() -> Self {
        Self::new("in-memory")
    }
}

impl PersistenceContext for InMemoryContext {
    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_live_until_closed() {
        let context = InMemoryContext::new("unit-of-work");
        assert!(context.is_live());
        assert_eq!(context.name(), "unit-of-work");

        context.close();
        assert!(!context.is_live());
    }
}

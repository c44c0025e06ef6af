//! Shared content snapshot with atomic replacement.
//!
//! Uses `arc-swap` for lock-free reads: every request loads the current
//! `Arc<ContentSnapshot>` once and renders from it, while the loader swaps
//! in a fresh snapshot after a reload.

use super::{Article, Note};
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Immutable view of all loaded content.
#[derive(Debug, Default)]
pub struct ContentSnapshot {
    /// Oldest first.
    articles: Vec<Article>,
    /// Newest first.
    notes: Vec<Note>,
}

impl ContentSnapshot {
    /// Callers provide articles oldest first and notes newest first.
    pub fn new(articles: Vec<Article>, notes: Vec<Note>) -> Self {
        Self { articles, notes }
    }

    #[inline]
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    #[inline]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

#[derive(Debug)]
pub struct ContentStore {
    current: ArcSwap<ContentSnapshot>,
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new(ContentSnapshot::default())
    }
}

impl ContentStore {
    pub fn new(snapshot: ContentSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Current snapshot.
    #[inline]
    pub fn load(&self) -> Arc<ContentSnapshot> {
        self.current.load_full()
    }

    /// Swap in a new snapshot. Readers holding the old one keep it.
    pub fn replace(&self, snapshot: ContentSnapshot) {
        self.current.store(Arc::new(snapshot));
    }
}

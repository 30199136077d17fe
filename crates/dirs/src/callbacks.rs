//! Root change notifications

use std::path::Path;

use crate::table::PathTable;

/// Subscriber invoked after a root change with the new root and table
pub type RootChangeCallback = Box<dyn Fn(&Path, &PathTable) + Send + Sync>;

/// Append-only, ordered list of root change subscribers
///
/// A callback must not itself trigger another root change.
#[derive(Default)]
pub struct RootChangeCallbacks {
    callbacks: Vec<RootChangeCallback>,
}

impl RootChangeCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber; there is no deduplication and no removal
    pub fn register(&mut self, callback: RootChangeCallback) {
        self.callbacks.push(callback);
    }

    /// Invoke every subscriber in registration order
    pub fn notify(&self, root: &Path, paths: &PathTable) {
        for callback in &self.callbacks {
            callback(root, paths);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl std::fmt::Debug for RootChangeCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootChangeCallbacks")
            .field("len", &self.callbacks.len())
            .finish()
    }
}

//! Read-through cache of the item list.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use stockcast_inventory::Item;

/// Holds the most recently loaded item list.
///
/// The owner fills it while holding the item table's read lock and clears it
/// while holding the write lock, so a cleared cache is never refilled with a
/// list older than the mutation that cleared it.
#[derive(Debug, Default)]
pub struct ItemCache {
    cached: RwLock<Option<Arc<Vec<Item>>>>,
    loads: AtomicU64,
}

impl ItemCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<Vec<Item>>> {
        self.cached.read().ok()?.clone()
    }

    /// Store a freshly loaded list and hand it back.
    pub fn fill(&self, items: Vec<Item>) -> Arc<Vec<Item>> {
        let items = Arc::new(items);
        if let Ok(mut cached) = self.cached.write() {
            *cached = Some(Arc::clone(&items));
        }
        self.loads.fetch_add(1, Ordering::Relaxed);
        items
    }

    pub fn invalidate(&self) {
        if let Ok(mut cached) = self.cached.write() {
            *cached = None;
        }
    }

    /// Number of times the list was loaded from the table.
    pub fn loads(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }
}

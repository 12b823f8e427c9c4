use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use studysync_extract::ExtractOptions;
use studysync_store::Store;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub store: Mutex<Store>,
    pub uploads_dir: PathBuf,
    pub options: ExtractOptions,
}

impl AppState {
    /// Lock the store; a poisoned lock is recovered, not propagated.
    pub fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }
}

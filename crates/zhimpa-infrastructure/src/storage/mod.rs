//! Key-value store backends.

mod json_file_store;
mod memory_store;

use std::sync::Arc;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;

use zhimpa_core::config::{StorageBackend, StorageSettings};
use zhimpa_core::error::Result;
use zhimpa_core::session::KeyValueStore;

use crate::paths::ZhimpaPaths;

/// Opens the store selected by `settings`.
///
/// The `file` backend falls back to `~/.config/zhimpa/session.json` when no
/// path is configured.
pub fn open_store(settings: &StorageSettings) -> Result<Arc<dyn KeyValueStore>> {
    match settings.backend {
        StorageBackend::Memory => {
            tracing::debug!("[Storage] Using in-memory session store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::File => {
            let path = match &settings.path {
                Some(path) => path.clone(),
                None => ZhimpaPaths::session_file()?,
            };
            tracing::debug!("[Storage] Using file session store at {:?}", path);
            Ok(Arc::new(JsonFileStore::new(path)))
        }
    }
}

pub mod storage;


pub use storage::{FileStorage, MemoryStorage, StoragePort};

use reputation_core::{SavedSearchEntry, SearchConfig, StorageError};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Key the saved-search list is stored under.
pub const STORAGE_KEY: &str = "rf_saved";
/// Number of entries kept, most recent first.
pub const CAPACITY: usize = 12;

pub struct SavedSearchStore {
    storage: Arc<dyn StoragePort>,
    entries: Vec<SavedSearchEntry>,
}

impl SavedSearchStore {
    /// Loads the persisted list. Missing, unreadable or corrupt data yields an
    /// empty list.
    pub fn open(storage: Arc<dyn StoragePort>) -> Self {
        let entries = match storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<SavedSearchEntry>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(CAPACITY);
                    debug!("Loaded {} saved searches", entries.len());
                    entries
                }
                Err(e) => {
                    warn!("Ignoring corrupt saved searches: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read saved searches: {}", e);
                Vec::new()
            }
        };

        Self { storage, entries }
    }

    pub fn entries(&self) -> &[SavedSearchEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&SavedSearchEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepends `config` and persists the list, keeping the newest
    /// [`CAPACITY`] entries. The in-memory list is updated even if writing
    /// fails.
    pub fn save(&mut self, config: SearchConfig) -> Result<&SavedSearchEntry, StorageError> {
        let entry = SavedSearchEntry::new(config);
        info!("Saving search '{}'", entry.config.query);

        self.entries.insert(0, entry);
        self.entries.truncate(CAPACITY);
        self.persist()?;

        Ok(&self.entries[0])
    }

    fn persist(&self) -> Result<(), StorageError> {
        let serialized =
            serde_json::to_string(&self.entries).map_err(|source| StorageError::Serialization {
                key: STORAGE_KEY.to_string(),
                source,
            })?;
        self.storage.set(STORAGE_KEY, &serialized)
    }
}

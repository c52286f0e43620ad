use std::{
    collections::HashMap,
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

use alloy::primitives::{Address, B256};
use tracing::{error, info};

use crate::{MonitorError, PoolEvent, PoolRecord};

/// Durable record of every pool this monitor has surfaced.
///
/// Membership is monotonic: entries are only added, never removed or mutated. The full document
/// is rewritten on every acceptance, which is acceptable because the store is bounded by the
/// number of distinct pools ever observed. [`PoolStore::accept`] is the only mutation path, so
/// an id present in the store has been handed to the notifier exactly once.
#[derive(Debug)]
pub struct PoolStore {
    path: PathBuf,
    pools: HashMap<B256, PoolRecord>,
}

impl PoolStore {
    /// Loads the persisted store, or starts empty when no usable state exists.
    ///
    /// A missing file is the normal first-run case. An unreadable or unparseable file is
    /// reported and degraded to an empty store; previously seen pools may be notified again.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        if !path.exists() {
            info!(path = %path.display(), "no existing pool store, starting empty");
            return Self { path, pools: HashMap::new() };
        }

        let pools = match Self::read(&path) {
            Ok(pools) => {
                info!(path = %path.display(), count = pools.len(), "loaded detected pools");
                pools
            }
            Err(err) => {
                error!(
                    path = %path.display(),
                    error = %err,
                    "pool store unreadable, starting empty; previously seen pools may be re-notified"
                );
                HashMap::new()
            }
        };

        Self { path, pools }
    }

    fn read(path: &Path) -> Result<HashMap<B256, PoolRecord>, MonitorError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    #[must_use]
    pub fn contains(&self, id: &B256) -> bool {
        self.pools.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &B256) -> Option<&PoolRecord> {
        self.pools.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Records a newly observed pool and persists the store.
    ///
    /// Returns `false` for an id that is already recorded, with no side effects. Returns `true`
    /// for a new id after inserting it and rewriting the document. A failed write is reported
    /// loudly but does not roll back the in-memory entry; durability resumes with the next
    /// successful save.
    pub fn accept(&mut self, event: &PoolEvent, pool_manager: Address) -> bool {
        if self.pools.contains_key(&event.id) {
            return false;
        }

        self.pools.insert(event.id, PoolRecord::new(event, pool_manager));

        if let Err(err) = self.save() {
            error!(
                pool_id = %event.id,
                error = %err,
                "failed to persist pool store; entry is held in memory until the next successful save"
            );
        }

        true
    }

    /// Rewrites the full store document.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Persistence`] when the file cannot be written.
    pub fn save(&self) -> Result<(), MonitorError> {
        let json = serde_json::to_string_pretty(&self.pools)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

// ── Device registry ──
//
// Append-only, ordered list of entity records. Readers take a lock-free
// snapshot; writers serialize on a mutex and publish a new snapshot.
// Address uniqueness is checked under the writer lock.

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use tracing::{debug, warn};

use isyctl_api::RestClient;

use crate::config::SeedRecord;
use crate::entity::Entity;
use crate::error::CoreError;
use crate::model::{Address, EntityRecord};

type Snapshot = Arc<Vec<Arc<EntityRecord>>>;

/// Known devices and scenes, in registration order.
pub struct Registry {
    records: ArcSwap<Vec<Arc<EntityRecord>>>,
    writer: Mutex<()>,
}

impl Registry {
    /// Build from a seed list. Invalid entries and duplicate addresses
    /// are skipped with a warning; the first occurrence wins.
    pub fn new(seed: &[SeedRecord]) -> Self {
        let mut records: Vec<Arc<EntityRecord>> = Vec::with_capacity(seed.len());

        for entry in seed {
            let record = match EntityRecord::new(&entry.name, &entry.address, entry.dimmable) {
                Ok(r) => r,
                Err(e) => {
                    warn!(name = %entry.name, error = %e, "skipping invalid seed entry");
                    continue;
                }
            };
            if records.iter().any(|r| r.address.same_as(&record.address)) {
                warn!(
                    name = %entry.name,
                    address = %record.address,
                    "skipping seed entry with duplicate address"
                );
                continue;
            }
            records.push(Arc::new(record));
        }

        debug!(count = records.len(), "registry seeded");
        Self {
            records: ArcSwap::from_pointee(records),
            writer: Mutex::new(()),
        }
    }

    pub fn empty() -> Self {
        Self::new(&[])
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Current records (cheap `Arc` clone).
    pub fn records(&self) -> Snapshot {
        self.records.load_full()
    }

    pub fn len(&self) -> usize {
        self.records.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.load().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Arc<EntityRecord>> {
        self.records.load().get(index).cloned()
    }

    pub fn contains_address(&self, address: &Address) -> bool {
        self.records
            .load()
            .iter()
            .any(|r| r.address.same_as(address))
    }

    /// First record whose pattern matches `name`.
    pub fn lookup(&self, name: &str) -> Option<Arc<EntityRecord>> {
        self.records
            .load()
            .iter()
            .find(|r| r.pattern.matches(name))
            .cloned()
    }

    /// Resolve free text to an entity bound to `client`.
    pub fn resolve(&self, name: &str, client: &RestClient) -> Result<Entity, CoreError> {
        let record = self.lookup(name).ok_or_else(|| CoreError::NotFound {
            name: name.trim().to_owned(),
        })?;
        debug!(query = name, matched = %record, "resolved");
        Ok(Entity::new(record, client.clone()))
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Register one entity. Fails without side effects when the address
    /// is already present.
    pub fn add(
        &self,
        name: &str,
        address: &str,
        dimmable: bool,
    ) -> Result<Arc<EntityRecord>, CoreError> {
        let record = EntityRecord::new(name, address, dimmable)?;
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        if self.contains_address(&record.address) {
            return Err(CoreError::DuplicateAddress {
                address: record.address.to_string(),
            });
        }

        let record = Arc::new(record);
        let mut next = Vec::clone(&self.records.load());
        next.push(Arc::clone(&record));
        self.records.store(Arc::new(next));
        Ok(record)
    }

    /// Register many records in one publish. Records whose address is
    /// already present (or repeated within the batch) are dropped.
    /// Returns the records that were actually inserted.
    pub fn extend(&self, batch: Vec<EntityRecord>) -> Vec<Arc<EntityRecord>> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let mut next = Vec::clone(&self.records.load());
        let mut inserted = Vec::new();
        for record in batch {
            if next.iter().any(|r| r.address.same_as(&record.address)) {
                debug!(address = %record.address, "already registered");
                continue;
            }
            let record = Arc::new(record);
            next.push(Arc::clone(&record));
            inserted.push(record);
        }

        if !inserted.is_empty() {
            self.records.store(Arc::new(next));
        }
        inserted
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

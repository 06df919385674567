//! The [`Storage`] handle: the live registry plus its optional snapshot file.
//!
//! All reads and mutations go through one `RwLock`, so a reader never observes a half-applied
//! update. `save` snapshots the registry under the read lock and then writes the snapshot
//! outside of it; an async flush mutex keeps concurrent saves in snapshot order.

use crate::builder::StorageBuilder;
use crate::error::StorageError;
use crate::persistence::SnapshotFile;
use crate::registry::Registry;
use hbnb_domain::config::{DeletePolicy, StorageConfig};
use hbnb_domain::models::{EntityKind, Model, Place, Record};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// The internal shared state of a [`Storage`] instance.
#[derive(Debug)]
pub struct StorageInner {
    pub(crate) registry: RwLock<Registry>,
    /// `None` for a volatile, memory-only engine.
    pub(crate) snapshot: Option<SnapshotFile>,
    pub(crate) delete_policy: DeletePolicy,
    /// Set by every mutation, cleared when a snapshot is taken.
    pub(crate) dirty: AtomicBool,
    pub(crate) closed: AtomicBool,
    pub(crate) flush: Mutex<()>,
}

/// A thread-safe handle to the storage engine.
///
/// Cheap to clone; every clone sees the same registry.
///
/// # Example
///
/// ```rust
/// use hbnb_domain::models::{NewState, State};
/// use hbnb_storage::{Storage, StorageError};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), StorageError> {
///     # let tmp = tempfile::tempdir().unwrap();
///     let storage = Storage::builder().root(tmp.path()).connect().await?;
///
///     let state = State::new(NewState { name: "California".to_owned() });
///     storage.register(&state);
///     storage.save().await?;
///
///     assert_eq!(storage.get::<State>(&state.meta.id), Some(state));
///     storage.close().await
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Storage {
    pub(crate) inner: Arc<StorageInner>,
}

impl Deref for Storage {
    type Target = StorageInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Storage {
    #[must_use = "The storage engine is not initialized until you call .connect()"]
    pub fn builder() -> StorageBuilder {
        StorageBuilder::new()
    }

    /// Connects the engine described by the `[storage]` configuration section.
    ///
    /// # Errors
    /// See [`StorageBuilder::connect`].
    pub async fn open(settings: &StorageConfig) -> Result<Self, StorageError> {
        StorageBuilder::from_settings(settings).connect().await
    }

    pub(crate) fn from_parts(
        registry: Registry,
        snapshot: Option<SnapshotFile>,
        delete_policy: DeletePolicy,
    ) -> Self {
        Self {
            inner: Arc::new(StorageInner {
                registry: RwLock::new(registry),
                snapshot,
                delete_policy,
                dirty: AtomicBool::new(false),
                closed: AtomicBool::new(false),
                flush: Mutex::new(()),
            }),
        }
    }

    /// Adds `model` to the live registry, replacing any entity with the same identity.
    /// Nothing reaches the snapshot until [`Storage::save`].
    pub fn register<T: Model>(&self, model: &T) {
        self.registry.write().insert(model.clone().into());
        self.mark_dirty();
        debug!(kind = %T::KIND, id = model.id(), "Entity registered");
    }

    #[must_use]
    pub fn get<T: Model>(&self, id: &str) -> Option<T> {
        self.registry.read().find::<T>(id).cloned()
    }

    /// Untyped lookup; resolves the kind at runtime.
    #[must_use]
    pub fn get_record(&self, kind: EntityKind, id: &str) -> Option<Record> {
        self.registry.read().get(kind, id).cloned()
    }

    #[must_use]
    pub fn exists<T: Model>(&self, id: &str) -> bool {
        self.registry.read().find::<T>(id).is_some()
    }

    /// Every entity of type `T`, oldest first.
    #[must_use]
    pub fn all<T: Model>(&self) -> Vec<T> {
        let mut models: Vec<T> = self.registry.read().models::<T>().cloned().collect();
        sort_by_creation(&mut models);
        models
    }

    /// Every entity, optionally of one kind, keyed by `"<Class>.<id>"`.
    #[must_use]
    pub fn all_records(&self, kind: Option<EntityKind>) -> BTreeMap<String, Record> {
        self.registry
            .read()
            .iter()
            .filter(|record| kind.is_none_or(|kind| record.kind() == kind))
            .map(|record| (record.storage_key(), record.clone()))
            .collect()
    }

    /// Number of live entities, optionally of one kind. Always equals `all_records(kind).len()`.
    #[must_use]
    pub fn count(&self, kind: Option<EntityKind>) -> usize {
        self.registry.read().len(kind)
    }

    /// Removes the entity; `None` when it was already absent.
    ///
    /// Dependents are handled by the configured [`DeletePolicy`].
    pub fn delete<T: Model>(&self, id: &str) -> Option<T> {
        let mut registry = self.registry.write();
        let removed = registry.remove(T::KIND, id)?;

        if self.delete_policy == DeletePolicy::Cascade {
            if T::KIND == EntityKind::Amenity {
                let unlinked = unlink_everywhere(&mut registry, id);
                debug!(amenity = id, places = unlinked, "Amenity unlinked from places");
            } else {
                let dependents = registry.remove_dependents(T::KIND, id);
                debug!(kind = %T::KIND, id, dependents, "Dependents removed");
            }
        }
        drop(registry);

        self.mark_dirty();
        debug!(kind = %T::KIND, id, "Entity deleted");
        T::from_record(&removed).cloned()
    }

    /// Mutates the entity in place under the write lock, then refreshes its `updated_at`.
    /// Returns the updated entity, or `None` when it does not exist.
    pub fn update<T: Model>(&self, id: &str, mutate: impl FnOnce(&mut T)) -> Option<T> {
        let mut registry = self.registry.write();
        let model = registry.find_mut::<T>(id)?;
        mutate(model);
        model.touch();
        let updated = model.clone();
        drop(registry);

        self.mark_dirty();
        debug!(kind = %T::KIND, id, "Entity updated");
        Some(updated)
    }

    /// Persists the whole registry atomically. A memory-only engine only checks it is open.
    ///
    /// # Errors
    /// * [`StorageError::Closed`] after [`Storage::close`].
    /// * [`StorageError::Serialization`] / [`StorageError::Io`] when the snapshot cannot be written;
    ///   the engine stays dirty so the next save retries.
    pub async fn save(&self) -> Result<(), StorageError> {
        let _flush = self.flush.lock().await;
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::Closed { context: Some("save".into()) });
        }
        self.flush_locked().await
    }

    /// Flushes unsaved changes and closes the engine. Calling it again is a no-op.
    ///
    /// # Errors
    /// Returns the flush error; the engine then stays open.
    pub async fn close(&self) -> Result<(), StorageError> {
        let _flush = self.flush.lock().await;
        if self.closed.load(Ordering::Acquire) {
            return Ok(());
        }
        if self.dirty.load(Ordering::Acquire) {
            self.flush_locked().await?;
        }
        self.closed.store(true, Ordering::Release);

        info!(entities = self.count(None), "Storage closed");
        Ok(())
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Whether mutations happened since the last snapshot.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn delete_policy(&self) -> DeletePolicy {
        self.inner.delete_policy
    }

    pub(crate) fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Caller holds the flush mutex.
    async fn flush_locked(&self) -> Result<(), StorageError> {
        let Some(snapshot) = &self.snapshot else {
            self.dirty.store(false, Ordering::Release);
            return Ok(());
        };

        let (bytes, entities) = {
            let registry = self.registry.read();
            self.dirty.store(false, Ordering::Release);
            (serde_json::to_vec(&*registry), registry.len(None))
        };

        let result = match bytes {
            Ok(bytes) => snapshot.write(&bytes).await,
            Err(source) => Err(StorageError::Serialization {
                source,
                context: Some("Snapshot encoding".into()),
            }),
        };
        if result.is_err() {
            self.mark_dirty();
        }
        result?;

        debug!(entities, "Registry saved");
        Ok(())
    }
}

/// Drops `amenity_id` from every place; returns how many places changed.
pub(crate) fn unlink_everywhere(registry: &mut Registry, amenity_id: &str) -> usize {
    let mut changed = 0;
    for place in registry.models_mut::<Place>() {
        if place.amenity_ids.remove(amenity_id) {
            place.touch();
            changed += 1;
        }
    }
    changed
}

pub(crate) fn sort_by_creation<T: Model>(models: &mut [T]) {
    models.sort_by(|a, b| (a.meta().created_at, a.id()).cmp(&(b.meta().created_at, b.id())));
}

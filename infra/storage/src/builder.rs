use crate::engine::Storage;
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance;
use crate::persistence::{Compression, SnapshotFile};
use crate::registry::Registry;
use hbnb_domain::config::{DeletePolicy, StorageConfig as StorageSettings};
use hbnb_domain::models::Record;
use private::Sealed;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

const DEFAULT_FILE_NAME: &str = "file.json";

#[derive(Debug, Clone)]
struct StorageConfig {
    compression: Compression,
    create: bool,
    file_name: String,
    delete_policy: DeletePolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            compression: Compression::None,
            create: true,
            file_name: DEFAULT_FILE_NAME.to_owned(),
            delete_policy: DeletePolicy::Orphan,
        }
    }
}

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);
#[derive(Debug)]
pub struct InMemory;

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}
impl Sealed for InMemory {}

#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct StorageBuilder<S: Sealed = NoRoot> {
    state: S,
    config: StorageConfig,
}

#[allow(private_bounds)]
impl<S: Sealed> StorageBuilder<S> {
    #[must_use = "Sets what happens to dependents when an owner is deleted"]
    pub const fn delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.config.delete_policy = policy;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> StorageBuilder<N> {
        StorageBuilder { state, config: self.config }
    }
}

impl StorageBuilder<NoRoot> {
    #[must_use = "Creates a new storage builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Persists snapshots inside `path`.
    #[must_use = "Sets the directory holding the snapshot file"]
    pub fn root(self, path: impl Into<PathBuf>) -> StorageBuilder<WithRoot> {
        self.transition(WithRoot(path.into()))
    }

    /// Volatile engine: nothing is loaded or written.
    #[must_use = "Selects a memory-only storage engine"]
    pub fn memory(self) -> StorageBuilder<InMemory> {
        self.transition(InMemory)
    }

    /// Applies the `[storage]` section of the API configuration.
    #[must_use = "Configures the builder from the API configuration"]
    pub fn from_settings(settings: &StorageSettings) -> ConfiguredBuilder {
        let builder = Self::new().delete_policy(settings.delete_policy);
        if settings.in_memory {
            return ConfiguredBuilder::Memory(builder.memory());
        }
        ConfiguredBuilder::File(
            builder
                .root(&settings.data_dir)
                .file_name(settings.file_name.clone())
                .compression(if settings.compression { Compression::Lz4 } else { Compression::None }),
        )
    }
}

/// Outcome of [`StorageBuilder::from_settings`].
#[derive(Debug)]
pub enum ConfiguredBuilder {
    File(StorageBuilder<WithRoot>),
    Memory(StorageBuilder<InMemory>),
}

impl ConfiguredBuilder {
    /// # Errors
    /// See [`StorageBuilder::connect`].
    pub async fn connect(self) -> Result<Storage, StorageError> {
        match self {
            Self::File(builder) => builder.connect().await,
            Self::Memory(builder) => builder.connect().await,
        }
    }
}

impl StorageBuilder<WithRoot> {
    #[must_use = "Sets compression for the snapshot file"]
    pub const fn compression(mut self, compression: Compression) -> Self {
        self.config.compression = compression;
        self
    }

    #[must_use = "Sets whether the root directory should be created if it does not exist"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.config.create = enable;
        self
    }

    #[must_use = "Sets the snapshot file name inside the root"]
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.config.file_name = name.into();
        self
    }

    /// Consumes the configuration and initializes the storage engine.
    ///
    /// Boot sequence:
    /// 1. Creates the root directory if `create(true)` (the default).
    /// 2. Canonicalizes the root.
    /// 3. Removes stale temp snapshots left by a crash.
    /// 4. Loads the snapshot; a missing file means an empty registry.
    ///
    /// # Errors
    ///
    /// * [`StorageError::InvalidConfiguration`] for an empty file name or one with separators.
    /// * [`StorageError::Io`] when the root cannot be created, resolved or read.
    /// * [`StorageError::Decompress`] / [`StorageError::Serialization`] for a corrupt snapshot.
    pub async fn connect(self) -> Result<Storage, StorageError> {
        let Self { state: WithRoot(root), config } = self;
        validate_file_name(&config.file_name)?;

        if config.create {
            fs::create_dir_all(&root)
                .await
                .context(format!("Failed to bootstrap storage root: {}", root.display()))?;
        }

        let canonical = fs::canonicalize(&root)
            .await
            .context(format!("Failed to resolve storage root: {}", root.display()))?;

        maintenance::purge_tmp(&canonical, &config.file_name).await;

        let snapshot = SnapshotFile::new(canonical, &config.file_name, config.compression);
        let registry = match snapshot.read().await? {
            Some(bytes) => decode(bytes).await?,
            None => Registry::default(),
        };

        info!(
            path = %snapshot.path.display(),
            entities = registry.len(None),
            policy = ?config.delete_policy,
            "Storage connected"
        );
        Ok(Storage::from_parts(registry, Some(snapshot), config.delete_policy))
    }
}

impl StorageBuilder<InMemory> {
    /// Creates an empty volatile engine.
    ///
    /// # Errors
    /// Never fails today; the signature matches the file-backed variant.
    #[allow(clippy::unused_async)]
    pub async fn connect(self) -> Result<Storage, StorageError> {
        info!(policy = ?self.config.delete_policy, "In-memory storage connected");
        Ok(Storage::from_parts(Registry::default(), None, self.config.delete_policy))
    }
}

fn validate_file_name(name: &str) -> Result<(), StorageError> {
    let invalid = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == "..";
    if invalid {
        return Err(StorageError::InvalidConfiguration {
            message: format!("Snapshot file name '{name}' must be a plain file name").into(),
            context: None,
        });
    }
    Ok(())
}

/// Snapshot decoding is CPU-bound; it runs off the async workers.
async fn decode(bytes: Vec<u8>) -> Result<Registry, StorageError> {
    let entries = tokio::task::spawn_blocking(move || {
        serde_json::from_slice::<BTreeMap<String, Record>>(&bytes)
    })
    .await
    .map_err(|e| StorageError::from(format!("Snapshot decoding task failed: {e}")))?
    .context("Snapshot decoding")?;

    Ok(Registry::from_records(entries.into_values()))
}

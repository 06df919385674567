use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level API configuration shared across services.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
}

/// What happens to dependents when an owner is deleted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Dependents stay in storage; they are no longer reachable through the deleted owner.
    #[default]
    Orphan,
    /// Dependents are removed transitively (State -> City -> Place -> Review, User -> Place/Review).
    Cascade,
}

/// File persistence of the storage engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Keep everything in memory; nothing is read or written.
    pub in_memory: bool,
    pub data_dir: PathBuf,
    pub file_name: String,
    /// LZ4-compress the snapshot file.
    pub compression: bool,
    pub delete_policy: DeletePolicy,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 5000 }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            in_memory: false,
            data_dir: PathBuf::from("."),
            file_name: "file.json".to_owned(),
            compression: false,
            delete_policy: DeletePolicy::Orphan,
        }
    }
}

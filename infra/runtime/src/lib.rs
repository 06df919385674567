//! # Runtime
//!
//! The multi-thread [Tokio](https://tokio.rs) runtime the API server runs on.
//!
//! Request handlers, the snapshot writes of the storage engine and the shutdown signal all run on
//! its workers. [`RuntimeConfig::server`] sizes the pool from the host; `#[hbnb_runtime::main]`
//! builds it and blocks on the entry point.
//!
//! ```rust,ignore
//! #[hbnb_runtime::main(workers = 4)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use hbnb_derive::main;

use anyhow::Context;
use std::num::NonZero;
use std::thread::available_parallelism;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

const FALLBACK_WORKERS: usize = 4;
const MAX_WORKERS: usize = 256;
/// Snapshot serialization of a large registry runs on the workers; 4 `MiB` leaves headroom.
const STACK_SIZE: usize = 4 * 1024 * 1024;
const KEEP_ALIVE: Duration = Duration::from_secs(300);
const THREAD_NAME: &str = "hbnb-api";

/// Sizing of the server runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub worker_threads: usize,
    pub thread_name: String,
}

impl RuntimeConfig {
    /// One worker per available core; `TOKIO_WORKER_THREADS` wins when it holds a valid count.
    #[must_use]
    pub fn server() -> Self {
        let from_env = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|raw| raw.parse().ok());
        let detected = available_parallelism().map_or(FALLBACK_WORKERS, NonZero::get);
        Self {
            worker_threads: from_env.unwrap_or(detected).clamp(1, MAX_WORKERS),
            thread_name: THREAD_NAME.to_owned(),
        }
    }

    /// Clamped to `1..=256`.
    #[must_use]
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.clamp(1, MAX_WORKERS);
        self
    }

    /// A blank name keeps the default.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.thread_name = name;
        }
        self
    }
}

/// Builds the multi-thread runtime with every driver (I/O, time, signals) enabled.
///
/// # Errors
/// The OS refuses to spawn the worker threads.
pub fn build_runtime(config: &RuntimeConfig) -> Result<Runtime> {
    debug!(workers = config.worker_threads, name = %config.thread_name, "Building server runtime");

    Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .thread_name(&config.thread_name)
        .thread_stack_size(STACK_SIZE)
        .thread_keep_alive(KEEP_ALIVE)
        .enable_all()
        .build()
        .context("Failed to initialize the server runtime")
}

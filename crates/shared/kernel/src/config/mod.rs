use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use hbnb_domain::config::ApiConfig;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides (`HBNB__SERVER__PORT=8080`).
pub const ENV_PREFIX: &str = "HBNB";

const DEFAULT_CONFIG_FILE: &str = "server";

/// `(legacy variable, prefixed variable, config key)`.
const LEGACY_ALIASES: [(&str, &str, &str); 2] = [
    ("HBNB_API_HOST", "HBNB__SERVER__ADDRESS", "server.address"),
    ("HBNB_API_PORT", "HBNB__SERVER__PORT", "server.port"),
];

/// Custom error type for config loading.
#[hbnb_derive::hbnb_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// 1. **Base File**: settings from a file (`server.toml`, `server.yaml`, ...). An explicit path must
///    exist; without one the optional `server` file of the working directory is used.
/// 2. **Environment Overrides**: variables prefixed with `HBNB__`, nested with double underscores
///    (`HBNB__STORAGE__DATA_DIR` maps to `storage.data_dir`).
///
/// # Errors
/// * An explicit file cannot be found or parsed.
/// * The merged values do not match `T`.
///
/// # Example
/// ```rust
/// use hbnb_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    layered(path)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}

/// [`load_config`] for the server configuration, additionally honoring the legacy
/// `HBNB_API_HOST` / `HBNB_API_PORT` variables. The `HBNB__SERVER__*` form wins when both are set.
///
/// # Errors
/// Same as [`load_config`]; a legacy value that does not parse fails deserialization.
pub fn load_api_config(path: Option<impl AsRef<Path>>) -> Result<ApiConfig, ConfigError> {
    api_config_with(path, |key| std::env::var(key).ok())
}

fn api_config_with(
    path: Option<impl AsRef<Path>>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ApiConfig, ConfigError> {
    let mut builder = layered(path);
    for (legacy, current, key) in LEGACY_ALIASES {
        if lookup(current).is_some() {
            continue;
        }
        if let Some(value) = lookup(legacy) {
            info!(variable = legacy, key, "Applying legacy environment alias");
            builder = builder.set_override(key, value).context(legacy)?;
        }
    }

    builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<ApiConfig>()
        .context("Failed to deserialize config")
}

fn layered(path: Option<impl AsRef<Path>>) -> ConfigBuilder<DefaultState> {
    let required = path.is_some();
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    info!(path = %effective_path.display(), required, "Loading config");

    Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        )
}

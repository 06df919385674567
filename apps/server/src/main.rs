use anyhow::Context;
use hbnb::kernel::config::{load_api_config, load_config};
use hbnb_logger::{LogSettings, Logger};
use hbnb_server::Server;
use serde::Deserialize;

/// The `[logging]` section, read before the subscriber exists.
#[derive(Deserialize)]
struct Bootstrap {
    #[serde(default)]
    logging: LogSettings,
}

#[hbnb_runtime::main]
async fn main() -> anyhow::Result<()> {
    let boot: Bootstrap =
        load_config(None::<&str>).context("Critical: Logging configuration is malformed")?;
    let _log = Logger::init(env!("CARGO_PKG_NAME"), &boot.logging)?;

    let cfg = load_api_config(None::<&str>).context("Critical: Configuration is malformed")?;

    Server::builder().config(cfg).build().await?.run().await
}

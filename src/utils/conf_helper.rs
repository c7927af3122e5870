use anyhow::{anyhow, Context, Result};
use std::sync::OnceLock;
use tokio::fs;
use tokio::net::TcpListener;
use tracing::info;

use crate::models::extension_model::ExtensionConfig;

static CONFIG_CACHE: OnceLock<ExtensionConfig> = OnceLock::new();
static CORE_URL: OnceLock<String> = OnceLock::new();

const PLUGIN_FILE: &str = "plugin.json";

pub async fn init_config_and_bind() -> Result<TcpListener> {
    let data = fs::read_to_string(PLUGIN_FILE)
        .await
        .with_context(|| format!("reading {PLUGIN_FILE}"))?;

    let mut config: ExtensionConfig =
        serde_json::from_str(&data).with_context(|| format!("parsing {PLUGIN_FILE}"))?;

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;

    // port 0 in plugin.json means "pick one"; report the real port to the core
    let actual_port = listener.local_addr()?.port();
    config.connection.port = actual_port;

    CORE_URL
        .set(config.core_url())
        .map_err(|_| anyhow!("Core URL already initialized"))?;

    CONFIG_CACHE
        .set(config)
        .map_err(|_| anyhow!("Config already initialized"))?;

    info!("Config initialized with dynamic port: {}", actual_port);

    Ok(listener)
}

pub fn get_cached_config() -> &'static ExtensionConfig {
    CONFIG_CACHE.get().expect("Config not initialized")
}

pub fn get_core_url() -> &'static String {
    CORE_URL.get().expect("Core URL not initialized")
}

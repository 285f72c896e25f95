use anyhow::Result;
use comemora_core::config::GlobalConfig;
use comemora_core::store::Store;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // Config and store are reloaded on each request to pick up filesystem
    // changes (edited config.toml, reseeded date table)
}

impl AppState {
    pub fn new() -> Result<Self> {
        // Verify the config and data directory are usable at startup
        let config = GlobalConfig::load()?;
        let _ = Store::open(&config)?;
        Ok(AppState {})
    }

    pub fn config(&self) -> Result<GlobalConfig> {
        Ok(GlobalConfig::load()?)
    }

    pub fn store(&self) -> Result<Store> {
        let config = GlobalConfig::load()?;
        Ok(Store::open(&config)?)
    }
}

pub mod calendars;
pub mod campaigns;
pub mod export;
pub mod plan;
pub mod suggest;

use anyhow::Result;
use comemora_core::config::GlobalConfig;
use comemora_core::store::Store;

/// Load the config and open the data directory.
pub fn open_store() -> Result<(GlobalConfig, Store)> {
    let config = GlobalConfig::load()?;
    let store = Store::open(&config)?;
    Ok((config, store))
}

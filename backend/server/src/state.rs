use std::sync::Arc;

use roster::{Store, StoreError};
use tokio::sync::Mutex;

use super::config::Config;

pub struct AppState {
    pub config: Config,
    /// Held across the duplicate check and the append so two posts can't both register a name.
    pub store: Mutex<Store>,
}

impl AppState {
    pub fn new() -> Result<Arc<Self>, StoreError> {
        Self::with_config(Config::load())
    }

    pub fn with_config(config: Config) -> Result<Arc<Self>, StoreError> {
        let store = Store::new(&config.data_file);
        store.initialize()?;

        Ok(Arc::new(Self {
            config,
            store: Mutex::new(store),
        }))
    }
}

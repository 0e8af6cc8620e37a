//! Persisted UI preferences.

use crate::repo::kv_store::{KvStore, StoreResult};
use log::warn;

const DARK_MODE_KEY: &str = "darkMode";

pub struct Settings<S: KvStore> {
    store: S,
    dark_mode: bool,
}

impl<S: KvStore> Settings<S> {
    pub fn load(store: S) -> Self {
        let dark_mode = read_dark_mode(&store);
        Self { store, dark_mode }
    }

    pub fn reload(&mut self) {
        self.dark_mode = read_dark_mode(&self.store);
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> StoreResult<()> {
        self.store
            .set(DARK_MODE_KEY, if enabled { "true" } else { "false" })?;
        self.dark_mode = enabled;
        Ok(())
    }
}

/// Anything other than the exact text `true` means off.
fn read_dark_mode(store: &impl KvStore) -> bool {
    match store.get(DARK_MODE_KEY) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(err) => {
            warn!("event=settings_load module=settings status=degraded error={err}");
            false
        }
    }
}

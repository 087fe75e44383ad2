//! Layout registry facade
//!
//! Combines the built-in defaults with the persisted override set. Reads
//! never fail: a malformed or unreadable override document must not crash
//! the application, so it is logged and the pure defaults are served.

use crate::defaults::default_layouts;
use crate::merge::overlay;
use crate::model::LayoutSet;
use crate::store::LayoutStore;
use crate::{Result, StoreError};
use tracing::{debug, warn};

/// Registry over an injected [`LayoutStore`].
pub struct LayoutRegistry<S: LayoutStore> {
    store: S,
}

impl<S: LayoutStore> LayoutRegistry<S> {
    /// Registry backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The complete merged layout set.
    ///
    /// All four default layouts are always present. Any failure to load or
    /// deserialize the override document falls back to the defaults.
    pub fn layouts(&self) -> LayoutSet {
        let defaults = default_layouts();

        let document = match self.store.load() {
            Ok(Some(document)) => document,
            Ok(None) => return defaults,
            Err(error) => {
                warn!(%error, "failed to load layout overrides, serving defaults");
                return defaults;
            }
        };

        match serde_json::from_str::<LayoutSet>(&document) {
            Ok(overrides) => {
                debug!(layouts = overrides.len(), "layout overrides applied");
                overlay(&defaults, &overrides)
            }
            Err(error) => {
                warn!(%error, "malformed layout override document, serving defaults");
                defaults
            }
        }
    }

    /// Serialize and persist `layouts` as the override set.
    pub fn save(&self, layouts: &LayoutSet) -> Result<()> {
        let document = serde_json::to_string(layouts)
            .map_err(|error| StoreError::Serialize(error.to_string()))?;
        self.store.save(&document)
    }

    /// Erase the persisted override set; subsequent reads serve pure
    /// defaults.
    pub fn restore_defaults(&self) -> Result<()> {
        self.store.clear()
    }
}

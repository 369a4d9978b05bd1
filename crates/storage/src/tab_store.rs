//! Persistence of practice tabs on top of a `KeyValueStore`.
//!
//! Layout, one opaque JSON blob per key:
//! - `studyTabs`: ordered list of tab descriptors
//! - `activeTabId`: id of the selected tab
//! - `tab_<id>_data`: full field record of one tab

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use study_core::model::{TabDescriptor, TabFields, TabId, TabSet};

use crate::repository::{KeyValueStore, StorageError};

pub const TABS_KEY: &str = "studyTabs";
pub const ACTIVE_TAB_KEY: &str = "activeTabId";
const TAB_DATA_PREFIX: &str = "tab_";
const TAB_DATA_SUFFIX: &str = "_data";

/// Key holding the field record of `id`.
#[must_use]
pub fn tab_data_key(id: TabId) -> String {
    format!("{TAB_DATA_PREFIX}{id}{TAB_DATA_SUFFIX}")
}

#[derive(Clone)]
pub struct TabStore {
    kv: Arc<dyn KeyValueStore>,
}

impl TabStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Overwrite the persisted record of a tab.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the write fails.
    pub async fn save(&self, id: TabId, fields: &TabFields) -> Result<(), StorageError> {
        self.write_json(&tab_data_key(id), fields).await
    }

    /// Last saved record of a tab, or `None` if it was never saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the read fails or the blob is not a field record.
    pub async fn load(&self, id: TabId) -> Result<Option<TabFields>, StorageError> {
        self.read_json(&tab_data_key(id)).await
    }

    /// Remove a tab's record. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub async fn delete(&self, id: TabId) -> Result<(), StorageError> {
        self.kv.remove(&tab_data_key(id)).await
    }

    /// Restore the tab bar. Missing keys yield the initial one-tab set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if a read fails or a blob cannot be decoded.
    pub async fn load_tab_set(&self) -> Result<TabSet, StorageError> {
        let tabs: Option<Vec<TabDescriptor>> = self.read_json(TABS_KEY).await?;
        let active: Option<TabId> = self.read_json(ACTIVE_TAB_KEY).await?;
        Ok(TabSet::from_persisted(tabs.unwrap_or_default(), active))
    }

    /// Persist the tab bar and the active tab.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or a write fails.
    pub async fn save_tab_set(&self, set: &TabSet) -> Result<(), StorageError> {
        self.write_json(TABS_KEY, set.tabs()).await?;
        self.write_json(ACTIVE_TAB_KEY, &set.active()).await
    }

    /// Delete every tab record and re-establish a single default tab.
    ///
    /// Records of tabs that are no longer listed in `studyTabs` are swept too.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if a read or write fails.
    pub async fn reset_all(&self) -> Result<TabSet, StorageError> {
        for key in self.kv.keys_with_prefix(TAB_DATA_PREFIX).await? {
            if key.ends_with(TAB_DATA_SUFFIX) {
                self.kv.remove(&key).await?;
            }
        }
        self.kv.remove(TABS_KEY).await?;
        self.kv.remove(ACTIVE_TAB_KEY).await?;

        let set = TabSet::initial();
        self.save_tab_set(&set).await?;
        Ok(set)
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.kv.get(key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StorageError::Serialization(format!("{key}: {err}")))
    }

    async fn write_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)
            .map_err(|err| StorageError::Serialization(format!("{key}: {err}")))?;
        self.kv.set(key, &raw).await
    }
}

use std::sync::Arc;

use chrono::{DateTime, Utc};
use storage::{KeyValueStore, TabStore};
use study_core::Clock;
use study_core::model::{TabFields, TabId, TabSet};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::TabServiceError;

/// Outcome of a field save: the tab bar after retitling, and when it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFields {
    pub tabs: TabSet,
    pub saved_at: DateTime<Utc>,
}

/// Tab bar workflows: every change to the set or to a tab's fields is
/// persisted before the call returns.
///
/// The service is the only writer of the tab bar. Operations run one at a
/// time in call order and hand back a snapshot of the set; failed operations
/// leave it unchanged.
#[derive(Clone)]
pub struct TabService {
    clock: Clock,
    store: TabStore,
    tabs: Arc<Mutex<Option<TabSet>>>,
}

impl TabService {
    #[must_use]
    pub fn new(clock: Clock, kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            clock,
            store: TabStore::new(kv),
            tabs: Arc::new(Mutex::new(None)),
        }
    }

    /// Restore the persisted tab bar, or the initial one-tab set.
    ///
    /// # Errors
    ///
    /// Returns `TabServiceError::Storage` if the store cannot be read or written.
    pub async fn open(&self) -> Result<TabSet, TabServiceError> {
        let mut current = self.tabs.lock().await;
        let set = self.store.load_tab_set().await?;
        self.store.save_tab_set(&set).await?;
        debug!(tabs = set.len(), active = %set.active(), "tab bar restored");
        *current = Some(set.clone());
        Ok(set)
    }

    /// Current tab bar.
    ///
    /// # Errors
    ///
    /// Returns `TabServiceError::Storage` if the set has to be loaded and the
    /// store cannot be read.
    pub async fn snapshot(&self) -> Result<TabSet, TabServiceError> {
        let mut current = self.tabs.lock().await;
        Ok(self.current(&mut current).await?.clone())
    }

    /// Saved fields of a tab, or defaults when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `TabServiceError::Storage` if the record cannot be read.
    pub async fn load_fields(&self, id: TabId) -> Result<TabFields, TabServiceError> {
        Ok(self.store.load(id).await?.unwrap_or_default())
    }

    /// Persist the full field record and retitle the tab from its topic.
    ///
    /// Nothing is written for a tab that is no longer open.
    ///
    /// # Errors
    ///
    /// Returns `TabServiceError::Tab` if the tab is not open, or `Storage` if a
    /// write fails.
    pub async fn save_fields(
        &self,
        id: TabId,
        fields: &TabFields,
    ) -> Result<SavedFields, TabServiceError> {
        let mut guard = self.tabs.lock().await;
        let current = self.current(&mut guard).await?;
        let mut next = current.clone();
        next.retitle_from_topic(id, &fields.topic)?;
        self.store.save(id, fields).await?;
        if next != *current {
            self.store.save_tab_set(&next).await?;
            *current = next;
        }
        Ok(SavedFields {
            tabs: current.clone(),
            saved_at: self.clock.now(),
        })
    }

    /// Open a new tab after the current maximum id and select it.
    ///
    /// # Errors
    ///
    /// Returns `TabServiceError::Storage` if the tab bar cannot be written.
    pub async fn add_tab(&self) -> Result<TabSet, TabServiceError> {
        let mut guard = self.tabs.lock().await;
        let current = self.current(&mut guard).await?;
        let mut next = current.clone();
        let id = next.add_tab();
        self.store.save_tab_set(&next).await?;
        *current = next;
        debug!(tab = %id, "tab added");
        Ok(current.clone())
    }

    /// Close a tab and delete its record.
    ///
    /// # Errors
    ///
    /// Returns `TabServiceError::Tab` for the last remaining tab or an unknown
    /// id (nothing is changed), or `Storage` if a write fails.
    pub async fn remove_tab(&self, id: TabId) -> Result<TabSet, TabServiceError> {
        let mut guard = self.tabs.lock().await;
        let current = self.current(&mut guard).await?;
        let mut next = current.clone();
        next.remove_tab(id)?;
        self.store.delete(id).await?;
        self.store.save_tab_set(&next).await?;
        *current = next;
        debug!(tab = %id, "tab removed");
        Ok(current.clone())
    }

    /// Select a tab.
    ///
    /// # Errors
    ///
    /// Returns `TabServiceError::Tab` for an unknown id, or `Storage` if the
    /// tab bar cannot be written.
    pub async fn select_tab(&self, id: TabId) -> Result<TabSet, TabServiceError> {
        let mut guard = self.tabs.lock().await;
        let current = self.current(&mut guard).await?;
        let mut next = current.clone();
        next.select(id)?;
        self.store.save_tab_set(&next).await?;
        *current = next;
        Ok(current.clone())
    }

    /// Clear one tab: its record is deleted and its title restored.
    ///
    /// The tab shows `TabFields::default()` afterwards.
    ///
    /// # Errors
    ///
    /// Returns `TabServiceError::Tab` for an unknown id, or `Storage` if a
    /// write fails.
    pub async fn reset_tab(&self, id: TabId) -> Result<TabSet, TabServiceError> {
        let mut guard = self.tabs.lock().await;
        let current = self.current(&mut guard).await?;
        let mut next = current.clone();
        next.retitle_from_topic(id, "")?;
        self.store.delete(id).await?;
        self.store.save_tab_set(&next).await?;
        *current = next;
        Ok(current.clone())
    }

    /// Drop every tab and record, leaving a single default tab.
    ///
    /// # Errors
    ///
    /// Returns `TabServiceError::Storage` if the store cannot be cleared.
    pub async fn reset_all(&self) -> Result<TabSet, TabServiceError> {
        let mut current = self.tabs.lock().await;
        let set = self.store.reset_all().await?;
        *current = Some(set.clone());
        debug!("all tabs reset");
        Ok(set)
    }

    async fn current<'a>(
        &self,
        slot: &'a mut Option<TabSet>,
    ) -> Result<&'a mut TabSet, TabServiceError> {
        if slot.is_none() {
            *slot = Some(self.store.load_tab_set().await?);
        }
        Ok(slot.get_or_insert_with(TabSet::initial))
    }
}

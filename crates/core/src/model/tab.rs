use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::TabId;
use crate::model::levels::{Accuracy, Language};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised by tab bar operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TabError {
    #[error("the last remaining tab cannot be removed")]
    LastTab,
    #[error("unknown tab {0}")]
    UnknownTab(TabId),
}

//
// ─── FIELDS ───────────────────────────────────────────────────────────────────
//

/// Form values of one practice tab.
///
/// The full record is always written together; there is no partial update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabFields {
    pub topic: String,
    pub student_name: String,
    pub school_grade: String,
    pub accuracy: Accuracy,
    pub language: Language,
    pub bullet_points: String,
    pub prepared_text: String,
    pub spoken_text: String,
}

impl TabFields {
    /// True when both required texts are present, so an analysis can be requested.
    #[must_use]
    pub fn is_ready_for_analysis(&self) -> bool {
        !self.bullet_points.is_empty() && !self.spoken_text.is_empty()
    }
}

//
// ─── TAB SET ──────────────────────────────────────────────────────────────────
//

/// Entry in the tab bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabDescriptor {
    pub id: TabId,
    pub title: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Title a tab carries while its topic is empty.
#[must_use]
pub fn default_title(id: TabId) -> String {
    format!("Topic {id}")
}

/// Ordered set of open tabs plus the active one.
///
/// Invariants: the set is never empty, ids are unique, and `active` always
/// names a tab in the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSet {
    tabs: Vec<TabDescriptor>,
    active: TabId,
}

impl TabSet {
    /// A fresh session: one tab titled `Topic 1`, active.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            tabs: vec![TabDescriptor {
                id: TabId::FIRST,
                title: default_title(TabId::FIRST),
                is_active: true,
            }],
            active: TabId::FIRST,
        }
    }

    /// Rebuild from persisted descriptors.
    ///
    /// An empty list yields the initial set; duplicate ids keep their first
    /// occurrence; an unknown or missing active id falls back to the first tab.
    #[must_use]
    pub fn from_persisted(tabs: Vec<TabDescriptor>, active: Option<TabId>) -> Self {
        let mut unique: Vec<TabDescriptor> = Vec::with_capacity(tabs.len());
        for tab in tabs {
            if !unique.iter().any(|existing| existing.id == tab.id) {
                unique.push(tab);
            }
        }
        let Some(first) = unique.first().map(|tab| tab.id) else {
            return Self::initial();
        };
        let active = active
            .filter(|id| unique.iter().any(|tab| tab.id == *id))
            .unwrap_or(first);
        let mut set = Self {
            tabs: unique,
            active,
        };
        set.sync_active_flags();
        set
    }

    #[must_use]
    pub fn tabs(&self) -> &[TabDescriptor] {
        &self.tabs
    }

    #[must_use]
    pub fn active(&self) -> TabId {
        self.active
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: TabId) -> bool {
        self.tabs.iter().any(|tab| tab.id == id)
    }

    #[must_use]
    pub fn get(&self, id: TabId) -> Option<&TabDescriptor> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    /// Id the next added tab will receive: max existing + 1.
    #[must_use]
    pub fn next_id(&self) -> TabId {
        self.tabs
            .iter()
            .map(|tab| tab.id)
            .max()
            .map_or(TabId::FIRST, |max| max.next())
    }

    /// Append a new default-titled tab and make it active.
    pub fn add_tab(&mut self) -> TabId {
        let id = self.next_id();
        self.tabs.push(TabDescriptor {
            id,
            title: default_title(id),
            is_active: false,
        });
        self.active = id;
        self.sync_active_flags();
        id
    }

    /// Remove a tab. Removing the active tab activates the first remaining one.
    ///
    /// # Errors
    ///
    /// Returns `TabError::LastTab` if this is the only tab, or
    /// `TabError::UnknownTab` if the id is not open. The set is unchanged on error.
    pub fn remove_tab(&mut self, id: TabId) -> Result<(), TabError> {
        if !self.contains(id) {
            return Err(TabError::UnknownTab(id));
        }
        if self.tabs.len() == 1 {
            return Err(TabError::LastTab);
        }
        self.tabs.retain(|tab| tab.id != id);
        if self.active == id {
            self.active = self.tabs[0].id;
        }
        self.sync_active_flags();
        Ok(())
    }

    /// Make a tab active.
    ///
    /// # Errors
    ///
    /// Returns `TabError::UnknownTab` if the id is not open.
    pub fn select(&mut self, id: TabId) -> Result<(), TabError> {
        if !self.contains(id) {
            return Err(TabError::UnknownTab(id));
        }
        self.active = id;
        self.sync_active_flags();
        Ok(())
    }

    /// Retitle a tab after its topic changed; an empty topic restores the default title.
    ///
    /// # Errors
    ///
    /// Returns `TabError::UnknownTab` if the id is not open.
    pub fn retitle_from_topic(&mut self, id: TabId, topic: &str) -> Result<(), TabError> {
        let tab = self
            .tabs
            .iter_mut()
            .find(|tab| tab.id == id)
            .ok_or(TabError::UnknownTab(id))?;
        tab.title = if topic.is_empty() {
            default_title(id)
        } else {
            topic.to_string()
        };
        Ok(())
    }

    fn sync_active_flags(&mut self) {
        let active = self.active;
        for tab in &mut self.tabs {
            tab.is_active = tab.id == active;
        }
    }
}

impl Default for TabSet {
    fn default() -> Self {
        Self::initial()
    }
}

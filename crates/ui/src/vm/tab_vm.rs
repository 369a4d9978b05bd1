use study_core::model::{TabId, TabSet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabChipVm {
    pub id: TabId,
    pub title: String,
    pub active: bool,
    pub closable: bool,
}

impl TabChipVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.active {
            "tab-chip tab-chip--active"
        } else {
            "tab-chip"
        }
    }
}

/// One chip per open tab; close buttons only while more than one tab is open.
#[must_use]
pub fn map_tab_chips(tabs: &TabSet) -> Vec<TabChipVm> {
    let closable = tabs.len() > 1;
    tabs.tabs()
        .iter()
        .map(|tab| TabChipVm {
            id: tab.id,
            title: tab.title.clone(),
            active: tab.id == tabs.active(),
            closable,
        })
        .collect()
}

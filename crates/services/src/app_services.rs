use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::gateway::StudyGateway;
use crate::tab_service::TabService;

/// Assembles the services the presentation layer needs.
#[derive(Clone)]
pub struct AppServices {
    tabs: Arc<TabService>,
    gateway: Arc<dyn StudyGateway>,
}

impl AppServices {
    /// Build services with tab state backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        gateway: Arc<dyn StudyGateway>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock, gateway))
    }

    /// Services over a throwaway in-memory store.
    #[must_use]
    pub fn in_memory(clock: Clock, gateway: Arc<dyn StudyGateway>) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, gateway)
    }

    fn from_storage(storage: &Storage, clock: Clock, gateway: Arc<dyn StudyGateway>) -> Self {
        Self {
            tabs: Arc::new(TabService::new(clock, Arc::clone(&storage.kv))),
            gateway,
        }
    }

    #[must_use]
    pub fn tabs(&self) -> Arc<TabService> {
        Arc::clone(&self.tabs)
    }

    #[must_use]
    pub fn gateway(&self) -> Arc<dyn StudyGateway> {
        Arc::clone(&self.gateway)
    }
}

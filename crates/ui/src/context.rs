use std::sync::Arc;

use services::{SpeechCapability, StudyGateway, TabService};

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn gateway(&self) -> Arc<dyn StudyGateway>;
    fn tab_service(&self) -> Arc<TabService>;
    fn speech(&self) -> Arc<dyn SpeechCapability + Send + Sync>;
}

#[derive(Clone)]
pub struct AppContext {
    gateway: Arc<dyn StudyGateway>,
    tab_service: Arc<TabService>,
    speech: Arc<dyn SpeechCapability + Send + Sync>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            gateway: app.gateway(),
            tab_service: app.tab_service(),
            speech: app.speech(),
        }
    }

    #[must_use]
    pub fn gateway(&self) -> Arc<dyn StudyGateway> {
        Arc::clone(&self.gateway)
    }

    #[must_use]
    pub fn tab_service(&self) -> Arc<TabService> {
        Arc::clone(&self.tab_service)
    }

    #[must_use]
    pub fn speech(&self) -> Arc<dyn SpeechCapability + Send + Sync> {
        Arc::clone(&self.speech)
    }
}

// Provided by the composition root (`crates/app`) through the launch builder.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::services::ClassifierService;

/// Explicitly threaded application state: configuration plus the one
/// long-lived classifier client. The classifier slot stays `None` when the
/// API key is missing so the web layer can still start and report itself
/// as not ready.
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub classifier: Option<Arc<dyn ClassifierService>>,
}

impl AppContext {
    pub fn new(config: AppConfig, classifier: Option<Arc<dyn ClassifierService>>) -> Self {
        Self { config, classifier }
    }

    pub fn classifier_ready(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn require_classifier(&self) -> AppResult<&Arc<dyn ClassifierService>> {
        self.classifier
            .as_ref()
            .ok_or_else(|| AppError::Configuration("classifier not initialized".to_string()))
    }
}

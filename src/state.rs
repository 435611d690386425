use std::sync::Arc;

use crate::{config::AppConfig, services::ServiceContext};

pub struct AppState {
    pub config: AppConfig,
    pub services: ServiceContext,
}

impl AppState {
    pub fn new(config: AppConfig, services: ServiceContext) -> Arc<Self> {
        Arc::new(Self { config, services })
    }

    pub fn is_development(&self) -> bool {
        self.config.general.environment.is_development()
    }
}

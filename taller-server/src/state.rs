use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::mailer::Mailer;
use crate::store::RegistrationStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub store: RegistrationStore,
    pub mailer: Arc<dyn Mailer>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: ServerConfig, store: RegistrationStore, mailer: Arc<dyn Mailer>) -> Self {
        AppState {
            config: Arc::new(config),
            store,
            mailer,
            started_at: Instant::now(),
        }
    }
}

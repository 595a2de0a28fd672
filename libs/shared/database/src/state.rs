use std::sync::Arc;

use shared_config::AppConfig;

use crate::memory::Database;
use crate::seed::seed_demo_data;

/// Router state shared by every cell.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            db: Database::new(),
        }
    }

    /// Builds the state and seeds demo content when the config asks for it.
    pub async fn bootstrap(config: AppConfig) -> Self {
        let state = Self::new(config);
        if state.config.seed_demo_data {
            seed_demo_data(&state.db).await;
        }
        state
    }
}

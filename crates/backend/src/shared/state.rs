use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::config::Config;

/// Общее состояние обработчиков: пул соединений и конфигурация
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

//! Application state shared by every handler.

use std::sync::Arc;

use crate::infra::{Database, UserStore};
use crate::services::{UserManager, UserService};

/// Application state (cheap to clone, everything behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection, used by the health check
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Wire the SeaORM repository and user service over a live database.
    pub fn from_database(database: Arc<Database>) -> Self {
        let user_repo = Arc::new(UserStore::new(database.get_connection()));
        let user_service: Arc<dyn UserService> = Arc::new(UserManager::new(user_repo));

        Self {
            user_service,
            database: Some(database),
        }
    }

    /// Create state with a manually injected service and no database.
    pub fn new(user_service: Arc<dyn UserService>) -> Self {
        Self {
            user_service,
            database: None,
        }
    }
}

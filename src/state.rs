use crate::database::Database;

/// Shared state handed to every handler through axum's `State` extractor
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

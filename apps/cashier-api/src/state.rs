//! Shared application state handed to every route.

use cashier_db::{CheckoutService, Database, SqliteStore};

/// Cheap to clone: the database handle shares one pool.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    checkout: CheckoutService<SqliteStore>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        let checkout = db.checkout();
        AppState { db, checkout }
    }

    pub fn checkout(&self) -> &CheckoutService<SqliteStore> {
        &self.checkout
    }
}

//! Shared gateway state.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::mason::Catalogue;
use crate::store::Database;
use crate::venue::VenueClient;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Account/order store
    pub db: Arc<Database>,
    /// Venue REST client
    pub venue: Arc<VenueClient>,
    /// Control catalogue (owns the route table)
    pub catalogue: Arc<Catalogue>,
}

impl AppState {
    pub fn new(db: Database, venue: VenueClient, catalogue: Catalogue) -> Self {
        Self {
            db: Arc::new(db),
            venue: Arc::new(venue),
            catalogue: Arc::new(catalogue),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        self.db.pool()
    }
}

//! Lexiscope Store: SQLite persistence for analysis records and
//! client-side search over them.

pub mod schema;
pub mod search;
pub mod sqlite;

use std::sync::Arc;

use lexiscope_core::{AnalysisRecord, DataPaths, Result, StoreMode};
use tracing::{info, warn};

pub use search::apply_query;
pub use sqlite::SqliteStore;

/// Persistence capability for analysis records.
pub trait AnalysisStore: Send + Sync {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Whether reads and writes can currently be served.
    fn is_available(&self) -> bool;

    fn insert(&self, record: &AnalysisRecord) -> Result<()>;

    fn get(&self, id: &str) -> Result<Option<AnalysisRecord>>;

    /// All records, newest first.
    fn list(&self) -> Result<Vec<AnalysisRecord>>;
}

/// Open the store selected by `mode`.
///
/// Returns `None` when persistence is disabled or the database cannot be
/// opened; analyses are then returned without being stored.
pub fn create_store(mode: StoreMode, paths: &DataPaths) -> Option<Arc<dyn AnalysisStore>> {
    match mode {
        StoreMode::Sqlite => match SqliteStore::open(&paths.database) {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                warn!("Database unavailable, running without persistence: {}", e);
                None
            }
        },
        StoreMode::Off => {
            info!("Persistence disabled, running in demo mode");
            None
        }
    }
}

use crate::config::EngineConfig;
use crate::plan::{EventPlan, PlanDocument};
use polars::prelude::PolarsError;
use serde_json::Error as SerdeJsonError;
use std::io;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] SerdeJsonError),
    #[error("dataframe conversion error: {0}")]
    DataFrame(#[from] PolarsError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[cfg(feature = "sqlite")]
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Keyed storage for plan documents. `load_plan` yields `None` for an event
/// that was never saved.
pub trait PlanStore {
    fn save_plan(&self, event_id: &str, document: &PlanDocument) -> PersistenceResult<()>;
    fn load_plan(&self, event_id: &str) -> PersistenceResult<Option<PlanDocument>>;
}

/// Event ids double as file names, so only a conservative alphabet is accepted.
pub fn validate_event_id(event_id: &str) -> PersistenceResult<()> {
    let ok = !event_id.is_empty()
        && event_id.len() <= 64
        && event_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(PersistenceError::InvalidData(format!(
            "invalid event id '{event_id}' (use letters, digits, '-' or '_')"
        )))
    }
}

/// Loads a stored plan, or starts a fresh one for an unknown event.
pub fn load_or_initialize<S: PlanStore + ?Sized>(
    store: &S,
    event_id: &str,
    config: EngineConfig,
) -> PersistenceResult<EventPlan> {
    match store.load_plan(event_id)? {
        Some(document) => Ok(EventPlan::from_document(document, config)),
        None => {
            info!(event_id, "no stored plan, starting fresh");
            Ok(EventPlan::new(config))
        }
    }
}

#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod file;

pub use file::{
    JsonDirectoryStore, load_plan_from_json, merge_entries_from_csv, save_entries_to_csv, save_plan_to_json,
    save_summary_to_csv,
};
#[cfg(feature = "sqlite")]
pub use sqlite::SqlitePlanStore;

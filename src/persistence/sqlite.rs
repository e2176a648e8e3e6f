use super::{PersistenceError, PersistenceResult, PlanStore, validate_event_id};
use crate::plan::PlanDocument;
use crate::plan_validation::validate_plan;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

/// One row per event id holding the JSON-encoded plan document.
pub struct SqlitePlanStore {
    connection: Mutex<Connection>,
}

impl SqlitePlanStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        let connection = Connection::open_in_memory()?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS plans (
                event_id TEXT PRIMARY KEY,
                plan_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn lock(&self) -> PersistenceResult<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| PersistenceError::InvalidData("sqlite connection lock poisoned".into()))
    }

    /// Stored event ids, sorted.
    pub fn event_ids(&self) -> PersistenceResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT event_id FROM plans ORDER BY event_id ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut ids = Vec::new();
        for id in rows {
            ids.push(id?);
        }
        Ok(ids)
    }

    pub fn delete_plan(&self, event_id: &str) -> PersistenceResult<bool> {
        validate_event_id(event_id)?;
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM plans WHERE event_id = ?1", params![event_id])?;
        Ok(removed > 0)
    }
}

impl PlanStore for SqlitePlanStore {
    fn save_plan(&self, event_id: &str, document: &PlanDocument) -> PersistenceResult<()> {
        validate_event_id(event_id)?;
        validate_plan(document)?;
        let json = serde_json::to_string(document)?;
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO plans (event_id, plan_json, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(event_id) DO UPDATE SET plan_json = excluded.plan_json, updated_at = excluded.updated_at",
            params![event_id, json, Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;
        info!(event_id, "plan saved to sqlite");
        Ok(())
    }

    fn load_plan(&self, event_id: &str) -> PersistenceResult<Option<PlanDocument>> {
        validate_event_id(event_id)?;
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT plan_json FROM plans WHERE event_id = ?1")?;
        let json_opt: Option<String> = stmt.query_row(params![event_id], |row| row.get(0)).optional()?;

        let Some(json) = json_opt else {
            return Ok(None);
        };
        let document: PlanDocument = serde_json::from_str(&json)?;
        validate_plan(&document)?;
        info!(event_id, "plan loaded from sqlite");
        Ok(Some(document))
    }
}

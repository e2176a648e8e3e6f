use super::{PersistenceError, PersistenceResult, PlanStore, validate_event_id};
use crate::catalog::ActivityId;
use crate::clock;
use crate::entry::ScheduleEntry;
use crate::plan::PlanDocument;
use crate::plan_validation::validate_plan;
use crate::summary::SummaryItem;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

pub fn save_plan_to_json<P: AsRef<Path>>(document: &PlanDocument, path: P) -> PersistenceResult<()> {
    validate_plan(document)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, document)?;
    Ok(())
}

pub fn load_plan_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<PlanDocument> {
    let file = File::open(path)?;
    let document: PlanDocument = serde_json::from_reader(BufReader::new(file))?;
    validate_plan(&document)?;
    Ok(document)
}

/// One pretty-printed JSON file per event, named `<event_id>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirectoryStore {
    root: PathBuf,
}

impl JsonDirectoryStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> PersistenceResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, event_id: &str) -> PersistenceResult<PathBuf> {
        validate_event_id(event_id)?;
        Ok(self.root.join(format!("{event_id}.json")))
    }
}

impl PlanStore for JsonDirectoryStore {
    fn save_plan(&self, event_id: &str, document: &PlanDocument) -> PersistenceResult<()> {
        let path = self.path_for(event_id)?;
        save_plan_to_json(document, &path)?;
        info!(event_id, path = %path.display(), "plan saved");
        Ok(())
    }

    fn load_plan(&self, event_id: &str) -> PersistenceResult<Option<PlanDocument>> {
        let path = self.path_for(event_id)?;
        if !path.exists() {
            return Ok(None);
        }
        let document = load_plan_from_json(&path)?;
        info!(event_id, path = %path.display(), "plan loaded");
        Ok(Some(document))
    }
}

#[derive(Serialize, Deserialize)]
struct SummaryCsvRecord {
    time: String,
    icon: String,
    label: String,
    duration_minutes: u32,
    source: String,
}

impl From<&SummaryItem> for SummaryCsvRecord {
    fn from(item: &SummaryItem) -> Self {
        Self {
            time: clock::format_hhmm(item.time),
            icon: item.icon.clone(),
            label: item.label.clone(),
            duration_minutes: item.duration,
            source: item.source.describe(),
        }
    }
}

pub fn save_summary_to_csv<P: AsRef<Path>>(items: &[SummaryItem], path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for item in items {
        writer.serialize(SummaryCsvRecord::from(item))?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Serialize, Deserialize)]
struct EntryCsvRecord {
    activity: String,
    included: bool,
    duration_minutes: u32,
    time: String,
    manual_time: bool,
    notes: String,
}

impl EntryCsvRecord {
    fn new(id: ActivityId, entry: &ScheduleEntry) -> Self {
        Self {
            activity: id.as_str().to_string(),
            included: entry.included,
            duration_minutes: entry.duration,
            time: entry.time.map(clock::format_hhmm).unwrap_or_default(),
            manual_time: entry.manual_time,
            notes: entry.notes.clone(),
        }
    }

    fn into_entry(self) -> PersistenceResult<(ActivityId, ScheduleEntry)> {
        let id = ActivityId::from_str(&self.activity)
            .map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
        let time = if self.time.trim().is_empty() {
            None
        } else {
            Some(clock::parse_hhmm(&self.time).ok_or_else(|| {
                PersistenceError::InvalidData(format!("invalid time '{}' for {id}", self.time))
            })?)
        };
        Ok((
            id,
            ScheduleEntry {
                included: self.included,
                duration: self.duration_minutes,
                time,
                manual_time: self.manual_time,
                notes: self.notes,
            },
        ))
    }
}

/// Writes the per-activity table in catalog order.
pub fn save_entries_to_csv<P: AsRef<Path>>(document: &PlanDocument, path: P) -> PersistenceResult<()> {
    validate_plan(document)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for (id, entry) in document.entries.iter() {
        writer.serialize(EntryCsvRecord::new(id, entry))?;
    }
    writer.flush()?;
    Ok(())
}

/// Replaces the rows named in the file; activities the file omits keep their
/// current entries. Returns the number of rows applied.
pub fn merge_entries_from_csv<P: AsRef<Path>>(document: &mut PlanDocument, path: P) -> PersistenceResult<usize> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut rows = Vec::new();
    for record in reader.deserialize::<EntryCsvRecord>() {
        rows.push(record?.into_entry()?);
    }
    if rows.is_empty() {
        return Err(PersistenceError::InvalidData("CSV file contained no activities".into()));
    }

    let mut merged = document.clone();
    let applied = rows.len();
    for (id, entry) in rows {
        merged.entries.insert(id, entry);
    }
    validate_plan(&merged)?;
    *document = merged;
    Ok(applied)
}

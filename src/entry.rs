use crate::catalog::{ActivityDefinition, ActivityId, CATALOG};
use crate::clock;
use crate::settings::Settings;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mutable per-event state of one catalog activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub included: bool,
    /// Minutes.
    pub duration: u32,
    /// Computed or manually entered start; kept while the entry is excluded.
    #[serde(with = "clock::hhmm_opt", default)]
    pub time: Option<NaiveTime>,
    /// Set once the time was edited directly; the engine never overwrites it.
    #[serde(default)]
    pub manual_time: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl ScheduleEntry {
    pub fn from_definition(def: &ActivityDefinition) -> Self {
        Self {
            included: def.always_included,
            duration: def.default_duration,
            time: None,
            manual_time: false,
            notes: String::new(),
        }
    }
}

/// One entry per catalog activity, iterated in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleState {
    entries: BTreeMap<ActivityId, ScheduleEntry>,
}

impl ScheduleState {
    /// Fresh state: every activity present, included iff always-included.
    pub fn initialize() -> Self {
        let entries = CATALOG
            .iter()
            .map(|def| (def.id, ScheduleEntry::from_definition(def)))
            .collect();
        Self { entries }
    }

    /// Adds default entries for any catalog activity missing from a loaded state.
    pub fn fill_missing(&mut self) -> usize {
        let mut added = 0;
        for def in CATALOG.iter() {
            if !self.entries.contains_key(&def.id) {
                self.entries.insert(def.id, ScheduleEntry::from_definition(def));
                added += 1;
            }
        }
        added
    }

    pub fn get(&self, id: ActivityId) -> Option<&ScheduleEntry> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: ActivityId) -> Option<&mut ScheduleEntry> {
        self.entries.get_mut(&id)
    }

    pub fn insert(&mut self, id: ActivityId, entry: ScheduleEntry) -> Option<ScheduleEntry> {
        self.entries.insert(id, entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActivityId, &ScheduleEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_included(&self, id: ActivityId) -> bool {
        self.get(id).is_some_and(|entry| entry.included)
    }

    pub fn time_of(&self, id: ActivityId) -> Option<NaiveTime> {
        self.get(id).and_then(|entry| entry.time)
    }

    /// Included and, for conditional activities, on the path the settings select.
    pub fn is_active(&self, id: ActivityId, settings: &Settings) -> bool {
        self.is_included(id)
            && id
                .definition()
                .conditional
                .is_none_or(|condition| settings.condition_holds(condition))
    }

    /// Time shown to the user: `None` unless the activity is active.
    pub fn visible_time(&self, id: ActivityId, settings: &Settings) -> Option<NaiveTime> {
        if self.is_active(id, settings) {
            self.time_of(id)
        } else {
            None
        }
    }
}

use crate::adhoc::{AdHocKind, AdHocLists};
use crate::calculations::golden_hour::GoldenHourZone;
use crate::calculations::{RecomputeEngine, RecomputeOutcome};
use crate::catalog::{ActivityId, UnknownActivity};
use crate::clock;
use crate::config::EngineConfig;
use crate::entry::{ScheduleEntry, ScheduleState};
use crate::settings::{MealService, RitualPlacement, Settings};
use crate::summary::{SummaryItem, build_summary};
use crate::sunset::{SunsetWindow, estimate_sunset};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error(transparent)]
    UnknownActivity(#[from] UnknownActivity),
    #[error("activity '{0}' cannot run concurrently")]
    NotConcurrent(ActivityId),
    #[error("activity '{0}' is not a formal ritual")]
    NotARitual(ActivityId),
    #[error("ad hoc entry {0} not found")]
    AdHocNotFound(u32),
    #[error("invalid time '{0}' (expected HH:MM)")]
    InvalidTime(String),
}

/// The persisted shape of one planned event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub settings: Settings,
    pub entries: ScheduleState,
    #[serde(default)]
    pub ad_hoc: AdHocLists,
}

impl PlanDocument {
    pub fn initialize() -> Self {
        Self {
            settings: Settings::default(),
            entries: ScheduleState::initialize(),
            ad_hoc: AdHocLists::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshSummary {
    pub included_count: usize,
    pub scheduled_count: usize,
    pub manual_count: usize,
    #[serde(with = "clock::hhmm")]
    pub preparation_start: NaiveTime,
    pub sunset_window: Option<SunsetWindow>,
    pub golden_hour_zone: Option<GoldenHourZone>,
}

impl RefreshSummary {
    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("included={}", self.included_count));
        parts.push(format!("scheduled={}", self.scheduled_count));
        if self.manual_count > 0 {
            parts.push(format!("manual={}", self.manual_count));
        }
        parts.push(format!("prep_start={}", clock::format_hhmm(self.preparation_start)));
        if let Some(window) = self.sunset_window {
            parts.push(format!("sunset={}", clock::format_hhmm(window.end)));
        }
        if let Some(zone) = self.golden_hour_zone {
            parts.push(format!("golden_hour={}", zone.as_str()));
        }
        parts.join(", ")
    }
}

/// Caller-owned planning session: holds the current document and replaces
/// its schedule state wholesale after every edit.
#[derive(Debug, Clone)]
pub struct EventPlan {
    document: PlanDocument,
    config: EngineConfig,
    last_refresh: RefreshSummary,
}

impl EventPlan {
    pub fn new(config: EngineConfig) -> Self {
        Self::from_document(PlanDocument::initialize(), config)
    }

    pub fn from_document(mut document: PlanDocument, config: EngineConfig) -> Self {
        let added = document.entries.fill_missing();
        if added > 0 {
            debug!(added, "filled catalog activities missing from document");
        }
        let mut plan = Self {
            document,
            config,
            last_refresh: RefreshSummary {
                included_count: 0,
                scheduled_count: 0,
                manual_count: 0,
                preparation_start: NaiveTime::default(),
                sunset_window: None,
                golden_hour_zone: None,
            },
        };
        plan.refresh();
        plan
    }

    pub fn document(&self) -> &PlanDocument {
        &self.document
    }

    pub fn into_document(self) -> PlanDocument {
        self.document
    }

    pub fn settings(&self) -> &Settings {
        &self.document.settings
    }

    pub fn state(&self) -> &ScheduleState {
        &self.document.entries
    }

    pub fn entry(&self, id: ActivityId) -> Option<&ScheduleEntry> {
        self.document.entries.get(id)
    }

    pub fn ad_hoc(&self) -> &AdHocLists {
        &self.document.ad_hoc
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn last_refresh(&self) -> &RefreshSummary {
        &self.last_refresh
    }

    pub fn sunset(&self) -> Option<NaiveTime> {
        estimate_sunset(self.document.settings.event_date, &self.config.location)
    }

    pub fn golden_hour_zone(&self) -> Option<GoldenHourZone> {
        self.last_refresh.golden_hour_zone
    }

    pub fn summary(&self) -> Vec<SummaryItem> {
        build_summary(&self.document.entries, &self.document.settings, &self.document.ad_hoc)
    }

    /// Runs the engine over the whole state and stores the result.
    pub fn refresh(&mut self) -> RefreshSummary {
        let sunset = self.sunset();
        let RecomputeOutcome {
            state,
            preparation_start,
            sunset_window,
            golden_hour_zone,
        } = RecomputeEngine::new(&self.config).run(&self.document.entries, &self.document.settings, sunset);
        self.document.entries = state;

        let entries = &self.document.entries;
        self.last_refresh = RefreshSummary {
            included_count: entries.iter().filter(|(_, e)| e.included).count(),
            scheduled_count: entries
                .iter()
                .filter(|(id, _)| entries.visible_time(*id, &self.document.settings).is_some())
                .count(),
            manual_count: entries.iter().filter(|(_, e)| e.manual_time).count(),
            preparation_start,
            sunset_window,
            golden_hour_zone,
        };
        self.last_refresh.clone()
    }

    fn edit_entry<F>(&mut self, id: ActivityId, mutator: F) -> RefreshSummary
    where
        F: FnOnce(&mut ScheduleEntry),
    {
        if let Some(entry) = self.document.entries.get_mut(id) {
            mutator(entry);
        }
        self.refresh()
    }

    pub fn update_settings<F>(&mut self, mutator: F) -> RefreshSummary
    where
        F: FnOnce(&mut Settings),
    {
        mutator(&mut self.document.settings);
        self.refresh()
    }

    pub fn set_included(&mut self, id: ActivityId, included: bool) -> RefreshSummary {
        debug!(activity = %id, included, "toggle activity");
        self.edit_entry(id, |entry| entry.included = included)
    }

    pub fn set_duration(&mut self, id: ActivityId, minutes: u32) -> RefreshSummary {
        self.edit_entry(id, |entry| entry.duration = minutes)
    }

    /// Pins an activity to a time. The ceremony is the primary anchor, so
    /// editing its time moves the anchor instead of creating an override.
    pub fn set_manual_time(&mut self, id: ActivityId, time: NaiveTime) -> RefreshSummary {
        if id.definition().is_anchor {
            return self.update_settings(|settings| settings.ceremony_time = time);
        }
        debug!(activity = %id, time = %clock::format_hhmm(time), "manual time");
        self.edit_entry(id, |entry| {
            entry.time = Some(time);
            entry.manual_time = true;
        })
    }

    /// Hands the activity back to the engine.
    pub fn clear_manual_time(&mut self, id: ActivityId) -> RefreshSummary {
        self.edit_entry(id, |entry| entry.manual_time = false)
    }

    pub fn set_notes(&mut self, id: ActivityId, notes: impl Into<String>) {
        if let Some(entry) = self.document.entries.get_mut(id) {
            entry.notes = notes.into();
        }
    }

    pub fn set_ceremony_time(&mut self, time: NaiveTime) -> RefreshSummary {
        self.update_settings(|settings| settings.ceremony_time = time)
    }

    pub fn set_end_time(&mut self, time: NaiveTime) -> RefreshSummary {
        self.update_settings(|settings| settings.end_time = time)
    }

    pub fn set_event_date(&mut self, date: Option<NaiveDate>) -> RefreshSummary {
        self.update_settings(|settings| settings.event_date = date)
    }

    pub fn set_off_site(&mut self, off_site: bool) -> RefreshSummary {
        self.update_settings(|settings| settings.off_site_ceremony = off_site)
    }

    pub fn set_first_look(&mut self, first_look: bool) -> RefreshSummary {
        self.update_settings(|settings| settings.first_look = first_look)
    }

    pub fn set_meal_service(&mut self, meal: MealService) -> RefreshSummary {
        self.update_settings(|settings| settings.meal_service = meal)
    }

    pub fn set_default_ritual_placement(&mut self, placement: RitualPlacement) -> RefreshSummary {
        self.update_settings(|settings| settings.set_default_ritual_placement(placement))
    }

    pub fn set_ritual_placement(
        &mut self,
        id: ActivityId,
        placement: RitualPlacement,
    ) -> Result<RefreshSummary, PlanError> {
        if !id.definition().can_choose_timing {
            return Err(PlanError::NotARitual(id));
        }
        Ok(self.update_settings(|settings| settings.set_ritual_placement(id, placement)))
    }

    pub fn set_concurrent(&mut self, id: ActivityId, concurrent: bool) -> Result<RefreshSummary, PlanError> {
        if !id.definition().can_be_concurrent() {
            return Err(PlanError::NotConcurrent(id));
        }
        Ok(self.update_settings(|settings| settings.set_concurrent(id, concurrent)))
    }

    pub fn add_shuttle(&mut self, kind: AdHocKind, time: NaiveTime, label: impl Into<String>) -> u32 {
        self.document.ad_hoc.add_shuttle(kind, time, label)
    }

    pub fn add_custom(&mut self, time: NaiveTime, label: impl Into<String>, duration: u32) -> u32 {
        self.document.ad_hoc.add_custom(time, label, duration)
    }

    pub fn remove_ad_hoc(&mut self, id: u32) -> Result<(), PlanError> {
        self.document
            .ad_hoc
            .remove(id)
            .map(|_| ())
            .ok_or(PlanError::AdHocNotFound(id))
    }
}

impl Default for EventPlan {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Parses `HH:MM`, mapping failure to [`PlanError::InvalidTime`].
pub fn parse_time(raw: &str) -> Result<NaiveTime, PlanError> {
    clock::parse_hhmm(raw).ok_or_else(|| PlanError::InvalidTime(raw.to_string()))
}

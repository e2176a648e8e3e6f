//! The recompute engine.
//!
//! [`RecomputeEngine::run`] is a pure function of (state, settings, sunset,
//! config): it clones the incoming state, positions every active activity,
//! and returns the new state. Entries with a manual time are never written.

pub mod backward_pass;
pub mod forward_pass;
pub mod golden_hour;

use crate::catalog::ActivityId;
use crate::clock;
use crate::config::EngineConfig;
use crate::entry::ScheduleState;
use crate::settings::Settings;
use crate::sunset::SunsetWindow;
use backward_pass::BackwardPass;
use chrono::NaiveTime;
use forward_pass::ForwardPass;
use golden_hour::GoldenHourZone;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A computed start, in running-clock minutes after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub id: ActivityId,
    pub start: i64,
}

/// Read-only view answering "does this activity count, and for how long".
pub struct Resolver<'a> {
    state: &'a ScheduleState,
    settings: &'a Settings,
    config: &'a EngineConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(state: &'a ScheduleState, settings: &'a Settings, config: &'a EngineConfig) -> Self {
        Self {
            state,
            settings,
            config,
        }
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    /// Included and its precondition, if any, holds.
    pub fn is_active(&self, id: ActivityId) -> bool {
        self.state.is_active(id, self.settings)
    }

    pub fn duration(&self, id: ActivityId) -> i64 {
        if !self.is_active(id) {
            return 0;
        }
        effective_duration(self.state, self.settings, id)
    }

    /// Sibling whose start this activity shares, when concurrency is switched on
    /// and the sibling itself is scheduled.
    pub fn concurrent_sibling(&self, id: ActivityId) -> Option<ActivityId> {
        let sibling = id.definition().concurrent_with?;
        if self.settings.is_concurrent(id) && self.is_active(sibling) {
            Some(sibling)
        } else {
            None
        }
    }

    pub fn active_in<'s>(&'s self, order: &'s [ActivityId]) -> impl Iterator<Item = ActivityId> + 's {
        order.iter().copied().filter(move |id| self.is_active(*id))
    }
}

/// Minutes an activity occupies under the current settings, ignoring inclusion.
pub fn effective_duration(state: &ScheduleState, settings: &Settings, id: ActivityId) -> i64 {
    let def = id.definition();
    if def.is_time_marker {
        return 0;
    }
    if id == ActivityId::Dinner {
        return i64::from(settings.meal_minutes());
    }
    if !settings.first_look {
        if let Some(minutes) = def.cocktail_duration {
            return i64::from(minutes);
        }
    }
    state
        .get(id)
        .map(|entry| i64::from(entry.duration))
        .unwrap_or_else(|| i64::from(def.default_duration))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecomputeOutcome {
    pub state: ScheduleState,
    #[serde(with = "clock::hhmm")]
    pub preparation_start: NaiveTime,
    pub sunset_window: Option<SunsetWindow>,
    pub golden_hour_zone: Option<GoldenHourZone>,
}

pub struct RecomputeEngine<'a> {
    config: &'a EngineConfig,
}

impl<'a> RecomputeEngine<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        state: &ScheduleState,
        settings: &Settings,
        sunset: Option<NaiveTime>,
    ) -> RecomputeOutcome {
        let resolver = Resolver::new(state, settings, self.config);
        let window = sunset.map(SunsetWindow::ending_at);
        let anchor = clock::to_minutes(settings.ceremony_time);

        let lead_in = BackwardPass::new(&resolver).execute(anchor);
        let program = ForwardPass::new(&resolver, window).execute(anchor);

        let golden_hour_zone = window.map(|window| {
            let zone = golden_hour::classify(&window, anchor, &program);
            if zone == GoldenHourZone::Early {
                warn!(
                    sunset = %clock::format_hhmm(window.end),
                    ceremony = %clock::format_hhmm(settings.ceremony_time),
                    "golden hour falls before the ceremony"
                );
            }
            zone
        });

        let mut next = state.clone();
        let mut written = 0usize;
        for placement in lead_in.placements.iter().chain(program.placements.iter()) {
            if let Some(entry) = next.get_mut(placement.id) {
                if entry.manual_time {
                    continue;
                }
                entry.time = Some(clock::from_minutes(placement.start));
                written += 1;
            }
        }
        debug!(
            written,
            preparation_start = %clock::format_hhmm(clock::from_minutes(lead_in.preparation_start)),
            "recompute finished"
        );

        RecomputeOutcome {
            state: next,
            preparation_start: clock::from_minutes(lead_in.preparation_start),
            sunset_window: window,
            golden_hour_zone,
        }
    }
}

/// Recompute with the default engine configuration.
pub fn recompute(state: &ScheduleState, settings: &Settings, sunset: Option<NaiveTime>) -> ScheduleState {
    let config = EngineConfig::default();
    RecomputeEngine::new(&config).run(state, settings, sunset).state
}

use crate::catalog::{ActivityId, Condition};
use crate::clock;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealService {
    #[default]
    Plated,
    Buffet,
    FamilyStyle,
    Stations,
}

impl MealService {
    pub const ALL: [MealService; 4] = [
        MealService::Plated,
        MealService::Buffet,
        MealService::FamilyStyle,
        MealService::Stations,
    ];

    /// Service length in minutes.
    pub fn duration_minutes(&self) -> u32 {
        match self {
            MealService::Plated => 75,
            MealService::Buffet => 60,
            MealService::FamilyStyle => 70,
            MealService::Stations => 90,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealService::Plated => "plated",
            MealService::Buffet => "buffet",
            MealService::FamilyStyle => "family_style",
            MealService::Stations => "stations",
        }
    }
}

impl FromStr for MealService {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase().replace('-', "_");
        MealService::ALL
            .iter()
            .copied()
            .find(|style| style.as_str() == needle)
            .ok_or_else(|| format!("unknown meal service '{value}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RitualPlacement {
    Before,
    #[default]
    After,
}

impl fmt::Display for RitualPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RitualPlacement::Before => f.write_str("before"),
            RitualPlacement::After => f.write_str("after"),
        }
    }
}

impl FromStr for RitualPlacement {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "before" => Ok(RitualPlacement::Before),
            "after" => Ok(RitualPlacement::After),
            other => Err(format!("unknown ritual placement '{other}' (before|after)")),
        }
    }
}

/// Global choices that drive the recompute engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(with = "clock::hhmm")]
    pub ceremony_time: NaiveTime,
    #[serde(with = "clock::hhmm")]
    pub end_time: NaiveTime,
    pub off_site_ceremony: bool,
    pub meal_service: MealService,
    pub ritual_placement: RitualPlacement,
    /// Only rituals whose placement differs from `ritual_placement`.
    pub ritual_overrides: BTreeMap<ActivityId, RitualPlacement>,
    /// Only activities whose definition names a concurrent sibling.
    pub concurrency: BTreeMap<ActivityId, bool>,
    /// Photography before the ceremony (true) or during the cocktail window.
    pub first_look: bool,
    pub event_date: Option<NaiveDate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ceremony_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default(),
            end_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default(),
            off_site_ceremony: false,
            meal_service: MealService::default(),
            ritual_placement: RitualPlacement::default(),
            ritual_overrides: BTreeMap::new(),
            concurrency: BTreeMap::new(),
            first_look: true,
            event_date: None,
        }
    }
}

impl Settings {
    pub fn placement_for(&self, ritual: ActivityId) -> RitualPlacement {
        self.ritual_overrides
            .get(&ritual)
            .copied()
            .unwrap_or(self.ritual_placement)
    }

    /// Changes the default and drops overrides that now match it.
    pub fn set_default_ritual_placement(&mut self, placement: RitualPlacement) {
        self.ritual_placement = placement;
        self.ritual_overrides.retain(|_, value| *value != placement);
    }

    /// Records a per-ritual placement, keeping the override map sparse.
    pub fn set_ritual_placement(&mut self, ritual: ActivityId, placement: RitualPlacement) {
        if placement == self.ritual_placement {
            self.ritual_overrides.remove(&ritual);
        } else {
            self.ritual_overrides.insert(ritual, placement);
        }
    }

    pub fn is_concurrent(&self, id: ActivityId) -> bool {
        self.concurrency.get(&id).copied().unwrap_or(false)
    }

    pub fn set_concurrent(&mut self, id: ActivityId, concurrent: bool) {
        if concurrent {
            self.concurrency.insert(id, true);
        } else {
            self.concurrency.remove(&id);
        }
    }

    pub fn condition_holds(&self, condition: Condition) -> bool {
        match condition {
            Condition::OffSiteCeremony => self.off_site_ceremony,
            Condition::FirstLookPath => self.first_look,
        }
    }

    pub fn meal_minutes(&self) -> u32 {
        self.meal_service.duration_minutes()
    }
}

pub mod adhoc;
pub mod calculations;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod entry;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod logging;
pub mod persistence;
pub mod plan;
pub mod plan_validation;
pub mod settings;
pub mod summary;
pub mod sunset;

pub use adhoc::{AdHocEntry, AdHocKind, AdHocLists};
pub use calculations::golden_hour::GoldenHourZone;
pub use calculations::{RecomputeEngine, RecomputeOutcome, recompute};
pub use catalog::{ActivityDefinition, ActivityId, Section, UnknownActivity};
pub use config::{ConfigError, EngineConfig, ObserverLocation};
pub use entry::{ScheduleEntry, ScheduleState};
pub use logging::{LoggingError, init_logging};
#[cfg(feature = "sqlite")]
pub use persistence::SqlitePlanStore;
pub use persistence::{
    JsonDirectoryStore, PersistenceError, PlanStore, load_or_initialize, load_plan_from_json,
    save_plan_to_json, save_summary_to_csv,
};
pub use plan::{EventPlan, PlanDocument, PlanError, RefreshSummary};
pub use plan_validation::validate_plan;
pub use settings::{MealService, RitualPlacement, Settings};
pub use summary::{SummaryItem, SummarySource, build_summary};
pub use sunset::{SunsetWindow, estimate_sunset};

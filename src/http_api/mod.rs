use std::{collections::HashMap, net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    AdHocEntry, AdHocKind, ActivityId, EngineConfig, EventPlan, PersistenceError, PlanDocument, PlanError,
    PlanStore, RefreshSummary, RitualPlacement, ScheduleEntry, Settings, SummaryItem, SunsetWindow, clock,
    persistence::{load_or_initialize, validate_event_id},
    plan::parse_time,
    sunset::sunset_window,
    validate_plan,
};

pub type SharedStore = Arc<dyn PlanStore + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    plans: Arc<RwLock<HashMap<String, EventPlan>>>,
    store: Option<SharedStore>,
    config: EngineConfig,
}

impl AppState {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            plans: Arc::new(RwLock::new(HashMap::new())),
            store: None,
            config,
        }
    }

    /// Plans are loaded from and written back to `store` on every edit.
    pub fn with_store(config: EngineConfig, store: SharedStore) -> Self {
        Self {
            store: Some(store),
            ..Self::new(config)
        }
    }

    fn ensure_loaded<'g>(
        &self,
        plans: &'g mut HashMap<String, EventPlan>,
        event_id: &str,
    ) -> Result<&'g mut EventPlan, ApiError> {
        validate_event_id(event_id)?;
        if !plans.contains_key(event_id) {
            let plan = match &self.store {
                Some(store) => load_or_initialize(store.as_ref(), event_id, self.config.clone())?,
                None => EventPlan::new(self.config.clone()),
            };
            plans.insert(event_id.to_string(), plan);
        }
        plans
            .get_mut(event_id)
            .ok_or_else(|| ApiError::internal("plan missing after load"))
    }

    fn read<T>(&self, event_id: &str, view: impl FnOnce(&EventPlan) -> T) -> Result<T, ApiError> {
        let mut guard = self.plans.write();
        let plan = self.ensure_loaded(&mut guard, event_id)?;
        Ok(view(plan))
    }

    fn edit<T>(
        &self,
        event_id: &str,
        mutator: impl FnOnce(&mut EventPlan) -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        let mut guard = self.plans.write();
        let plan = self.ensure_loaded(&mut guard, event_id)?;
        // cached plan only changes once the store accepted the edit
        let mut draft = plan.clone();
        let out = mutator(&mut draft)?;
        if let Some(store) = &self.store {
            store.save_plan(event_id, draft.document())?;
        }
        *plan = draft;
        Ok(out)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }

    fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<PlanError> for ApiError {
    fn from(value: PlanError) -> Self {
        match value {
            PlanError::UnknownActivity(_) | PlanError::AdHocNotFound(_) => ApiError::not_found(value.to_string()),
            other => ApiError::invalid(other.to_string()),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(value: PersistenceError) -> Self {
        match value {
            PersistenceError::InvalidData(message) => ApiError::Invalid(message),
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            ApiError::Invalid(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message),
        };
        (status, Json(ErrorBody { error, message })).into_response()
    }
}

#[derive(Debug, Serialize)]
struct PlanView {
    event_id: String,
    #[serde(flatten)]
    document: PlanDocument,
    refresh: RefreshSummary,
}

#[derive(Debug, Deserialize)]
struct ActivityPatch {
    included: Option<bool>,
    duration: Option<u32>,
    /// `HH:MM` pins the activity; ignored when `auto` is true.
    time: Option<String>,
    #[serde(default)]
    auto: bool,
    notes: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConcurrencyPayload {
    concurrent: bool,
}

#[derive(Debug, Deserialize)]
struct RitualPayload {
    placement: RitualPlacement,
}

#[derive(Debug, Deserialize)]
struct AdHocPayload {
    kind: AdHocKind,
    time: String,
    label: String,
    #[serde(default)]
    duration: u32,
}

#[derive(Debug, Deserialize)]
struct SunsetQuery {
    date: String,
}

#[derive(Debug, Serialize)]
struct SunsetView {
    date: NaiveDate,
    sunset: Option<String>,
    window: Option<SunsetWindow>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sunset", get(sunset_for_date))
        .route("/events/:event_id", get(get_plan))
        .route("/events/:event_id/settings", put(replace_settings))
        .route("/events/:event_id/activities/:activity", patch(patch_activity))
        .route("/events/:event_id/concurrency/:activity", put(set_concurrency))
        .route("/events/:event_id/rituals/:activity", put(set_ritual_placement))
        .route("/events/:event_id/ad_hoc", post(create_ad_hoc))
        .route("/events/:event_id/ad_hoc/:entry_id", delete(delete_ad_hoc))
        .route("/events/:event_id/summary", get(get_summary))
        .route("/events/:event_id/refresh", post(refresh_plan))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

fn parse_activity(raw: &str) -> Result<ActivityId, ApiError> {
    ActivityId::from_str(raw).map_err(|err| ApiError::not_found(err.to_string()))
}

async fn sunset_for_date(
    State(state): State<AppState>,
    Query(query): Query<SunsetQuery>,
) -> Result<Json<SunsetView>, ApiError> {
    let date = NaiveDate::parse_from_str(query.date.trim(), "%Y-%m-%d")
        .map_err(|err| ApiError::invalid(format!("invalid date '{}': {err}", query.date)))?;
    let window = sunset_window(Some(date), &state.config.location);
    Ok(Json(SunsetView {
        date,
        sunset: window.map(|w| clock::format_hhmm(w.end)),
        window,
    }))
}

async fn get_plan(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<PlanView>, ApiError> {
    let view = state.read(&event_id, |plan| PlanView {
        event_id: event_id.clone(),
        document: plan.document().clone(),
        refresh: plan.last_refresh().clone(),
    })?;
    Ok(Json(view))
}

async fn replace_settings(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(settings): Json<Settings>,
) -> Result<Json<RefreshSummary>, ApiError> {
    let summary = state.edit(&event_id, |plan| {
        let mut candidate = plan.document().clone();
        candidate.settings = settings.clone();
        validate_plan(&candidate)?;
        Ok(plan.update_settings(|current| *current = settings))
    })?;
    Ok(Json(summary))
}

async fn patch_activity(
    State(state): State<AppState>,
    Path((event_id, activity)): Path<(String, String)>,
    Json(body): Json<ActivityPatch>,
) -> Result<Json<ScheduleEntry>, ApiError> {
    let id = parse_activity(&activity)?;
    let pinned = match body.time.as_deref() {
        Some(raw) if !body.auto => Some(parse_time(raw)?),
        _ => None,
    };
    if body.duration.is_some_and(|minutes| i64::from(minutes) > clock::MINUTES_PER_DAY) {
        return Err(ApiError::invalid("duration must not exceed one day"));
    }

    let entry = state.edit(&event_id, |plan| {
        if let Some(included) = body.included {
            plan.set_included(id, included);
        }
        if let Some(minutes) = body.duration {
            plan.set_duration(id, minutes);
        }
        if let Some(notes) = body.notes {
            plan.set_notes(id, notes);
        }
        if body.auto {
            plan.clear_manual_time(id);
        } else if let Some(time) = pinned {
            plan.set_manual_time(id, time);
        }
        plan.entry(id)
            .cloned()
            .ok_or_else(|| ApiError::internal("activity missing from plan"))
    })?;
    Ok(Json(entry))
}

async fn set_concurrency(
    State(state): State<AppState>,
    Path((event_id, activity)): Path<(String, String)>,
    Json(payload): Json<ConcurrencyPayload>,
) -> Result<Json<RefreshSummary>, ApiError> {
    let id = parse_activity(&activity)?;
    let summary = state.edit(&event_id, |plan| Ok(plan.set_concurrent(id, payload.concurrent)?))?;
    Ok(Json(summary))
}

async fn set_ritual_placement(
    State(state): State<AppState>,
    Path((event_id, activity)): Path<(String, String)>,
    Json(payload): Json<RitualPayload>,
) -> Result<Json<RefreshSummary>, ApiError> {
    let id = parse_activity(&activity)?;
    let summary = state.edit(&event_id, |plan| {
        Ok(plan.set_ritual_placement(id, payload.placement)?)
    })?;
    Ok(Json(summary))
}

async fn create_ad_hoc(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
    Json(payload): Json<AdHocPayload>,
) -> Result<(StatusCode, Json<AdHocEntry>), ApiError> {
    let time = parse_time(&payload.time)?;
    if i64::from(payload.duration) > clock::MINUTES_PER_DAY {
        return Err(ApiError::invalid("duration must not exceed one day"));
    }
    let created = state.edit(&event_id, |plan| {
        let id = if payload.kind.is_shuttle() {
            plan.add_shuttle(payload.kind, time, payload.label)
        } else {
            plan.add_custom(time, payload.label, payload.duration)
        };
        plan.ad_hoc()
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::internal("ad hoc entry missing after creation"))
    })?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_ad_hoc(
    State(state): State<AppState>,
    Path((event_id, entry_id)): Path<(String, u32)>,
) -> Result<StatusCode, ApiError> {
    state.edit(&event_id, |plan| Ok(plan.remove_ad_hoc(entry_id)?))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_summary(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<Vec<SummaryItem>>, ApiError> {
    let items = state.read(&event_id, |plan| plan.summary())?;
    Ok(Json(items))
}

async fn refresh_plan(
    State(state): State<AppState>,
    Path(event_id): Path<String>,
) -> Result<Json<RefreshSummary>, ApiError> {
    let summary = state.edit(&event_id, |plan| Ok(plan.refresh()))?;
    Ok(Json(summary))
}

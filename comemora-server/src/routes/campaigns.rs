//! Campaign endpoints

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use comemora_core::campaign::{Campaign, DateSelection};
use comemora_core::store::AutoCreateOutcome;
use comemora_core::ComemoraError;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendars/{calendar}/campaigns", get(list_campaigns))
        .route("/calendars/{calendar}/campaigns", post(create_campaign))
        .route(
            "/calendars/{calendar}/campaigns/from-dates",
            post(create_from_dates),
        )
        .route(
            "/calendars/{calendar}/campaigns/{id}",
            get(get_campaign).delete(delete_campaign),
        )
}

/// GET /calendars/:calendar/campaigns - List campaigns, sorted by start date
async fn list_campaigns(
    State(state): State<AppState>,
    Path(calendar): Path<String>,
) -> Result<Json<Vec<Campaign>>, AppError> {
    let store = state.store()?;
    let campaigns = store
        .campaigns(&calendar)?
        .into_iter()
        .map(|local| local.campaign)
        .collect();
    Ok(Json(campaigns))
}

/// Request body for manually creating a campaign
#[derive(Deserialize)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub objective: Option<String>,
    pub description: Option<String>,
    pub offer: Option<String>,
}

/// POST /calendars/:calendar/campaigns - Create a campaign from the form path
async fn create_campaign(
    State(state): State<AppState>,
    Path(calendar): Path<String>,
    Json(req): Json<CreateCampaignRequest>,
) -> Result<Json<Campaign>, AppError> {
    if req.end_date < req.start_date {
        return Err(ComemoraError::InvalidRequest(
            "end_date must not precede start_date".to_string(),
        )
        .into());
    }

    let mut campaign = Campaign::new(req.name, req.start_date, req.end_date);
    campaign.objective = req.objective;
    campaign.description = req.description;
    campaign.offer = req.offer;

    let store = state.store()?;
    let local = store.create_campaign(&calendar, &campaign)?;

    Ok(Json(local.campaign))
}

/// Request body for the one-click creation path
#[derive(Deserialize)]
pub struct CreateFromDatesRequest {
    pub dates: Vec<DateSelection>,
}

/// POST /calendars/:calendar/campaigns/from-dates - Idempotently create one
/// campaign per selected (date, title) pair
async fn create_from_dates(
    State(state): State<AppState>,
    Path(calendar): Path<String>,
    Json(req): Json<CreateFromDatesRequest>,
) -> Result<Json<AutoCreateOutcome>, AppError> {
    if req.dates.is_empty() {
        return Err(
            ComemoraError::InvalidRequest("no dates selected".to_string()).into(),
        );
    }

    let store = state.store()?;
    let outcome = store.auto_create_campaigns(&calendar, &req.dates)?;

    Ok(Json(outcome))
}

/// GET /calendars/:calendar/campaigns/:id - Fetch one campaign
async fn get_campaign(
    State(state): State<AppState>,
    Path((calendar, id)): Path<(String, Uuid)>,
) -> Result<Json<Campaign>, AppError> {
    let store = state.store()?;
    let local = store.get_campaign(&calendar, id)?;
    Ok(Json(local.campaign))
}

/// DELETE /calendars/:calendar/campaigns/:id - Delete a campaign
async fn delete_campaign(
    State(state): State<AppState>,
    Path((calendar, id)): Path<(String, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = state.store()?;
    store.delete_campaign(&calendar, id)?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

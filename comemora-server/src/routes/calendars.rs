//! Calendar endpoints

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendars", get(list_calendars))
        .route("/calendars", post(create_calendar))
}

/// GET /calendars - List all calendar slugs
async fn list_calendars(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let store = state.store()?;
    Ok(Json(store.calendars()?))
}

/// Request body for creating a calendar
#[derive(Deserialize)]
pub struct CreateCalendarRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct CreateCalendarResponse {
    pub slug: String,
}

/// POST /calendars - Create a new calendar
async fn create_calendar(
    State(state): State<AppState>,
    Json(req): Json<CreateCalendarRequest>,
) -> Result<Json<CreateCalendarResponse>, AppError> {
    let store = state.store()?;
    let slug = store.create_calendar(&req.name)?;
    Ok(Json(CreateCalendarResponse { slug }))
}

//! The relevant-dates endpoint: the pipeline's function boundary.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use comemora_core::date::FormattedDate;
use comemora_core::llm::LlmClient;
use comemora_core::suggest;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/dates/relevant", post(relevant_dates))
}

#[derive(Deserialize)]
pub struct RelevantDatesRequest {
    pub niches: Vec<String>,
}

#[derive(Serialize)]
pub struct RelevantDatesResponse {
    pub dates: Vec<FormattedDate>,
}

/// POST /dates/relevant - rank commemorative dates for the selected niches
async fn relevant_dates(
    State(state): State<AppState>,
    Json(req): Json<RelevantDatesRequest>,
) -> Result<Json<RelevantDatesResponse>, AppError> {
    let config = state.config()?;
    let store = state.store()?;
    let llm = LlmClient::new(config.llm.clone())?;

    let dates = suggest::suggest_dates(&store, &llm, &req.niches).await?;

    Ok(Json(RelevantDatesResponse { dates }))
}

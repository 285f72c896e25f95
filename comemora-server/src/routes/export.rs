//! File download endpoints

use axum::{
    Router,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use comemora_core::ComemoraError;
use comemora_core::campaign::Campaign;
use comemora_core::export;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calendars/{calendar}/export.csv", get(export_csv))
        .route("/calendars/{calendar}/export.pdf", get(export_pdf))
}

/// GET /calendars/:calendar/export.csv - Campaign list as CSV
async fn export_csv(
    State(state): State<AppState>,
    Path(calendar): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let campaigns = load_campaigns(&state, &calendar)?;
    let body = export::render_csv(&campaigns);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}-campanhas.csv\"", calendar),
            ),
        ],
        body,
    ))
}

#[derive(Deserialize)]
pub struct PdfQuery {
    /// Month for the grid page, YYYY-MM. Defaults to the current month.
    pub month: Option<String>,
}

/// GET /calendars/:calendar/export.pdf - Month grid plus detail table
async fn export_pdf(
    State(state): State<AppState>,
    Path(calendar): Path<String>,
    Query(query): Query<PdfQuery>,
) -> Result<impl IntoResponse, AppError> {
    let month = match query.month {
        Some(raw) => NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d").map_err(
            |_| ComemoraError::InvalidRequest(format!("invalid month '{}', expected YYYY-MM", raw)),
        )?,
        None => Utc::now().date_naive(),
    };

    let campaigns = load_campaigns(&state, &calendar)?;
    let body = export::render_pdf(&campaigns, month)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}-campanhas.pdf\"", calendar),
            ),
        ],
        body,
    ))
}

fn load_campaigns(state: &AppState, calendar: &str) -> Result<Vec<Campaign>, AppError> {
    let store = state.store()?;
    Ok(store
        .campaigns(calendar)?
        .into_iter()
        .map(|local| local.campaign)
        .collect())
}

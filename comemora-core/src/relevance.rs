//! Relevance judgments and structural validation of model output.
//!
//! Everything the completion service returns is untrusted until it passes
//! `parse_ranked`. The validator accepts either a bare JSON array or an
//! object wrapping the array in a `dates` field, and rejects anything that is
//! structurally off: empty arrays, missing fields, unknown relevance values,
//! dates that are not YYYY-MM-DD.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::DATE_FORMAT;

/// The model's judgment of a date's importance to the selected niches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    High,
    Medium,
    Low,
}

/// A single ranked date as claimed by the model.
///
/// The date stays a string here: it has been checked to parse, but the
/// reconciler re-parses it when matching against the candidate table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedDate {
    pub date: String,
    pub relevance: Relevance,
    pub reason: String,
}

impl RankedDate {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }
}

/// Validate a raw model payload into ranked dates.
///
/// Returns the rejection reason on failure so the caller can retry with a
/// more explicit prompt.
pub fn parse_ranked(payload: &str) -> Result<Vec<RankedDate>, String> {
    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| format!("payload is not valid JSON: {}", e))?;

    let items = value
        .as_array()
        .or_else(|| value.get("dates").and_then(|d| d.as_array()))
        .ok_or_else(|| "expected a JSON array or an object with a `dates` array".to_string())?;

    if items.is_empty() {
        return Err("the array of ranked dates is empty".to_string());
    }

    let mut ranked = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let record: RankedDate = serde_json::from_value(item.clone())
            .map_err(|e| format!("item {} is malformed: {}", index, e))?;
        if record.parsed_date().is_none() {
            return Err(format!(
                "item {} has date '{}', expected YYYY-MM-DD",
                index, record.date
            ));
        }
        ranked.push(record);
    }

    Ok(ranked)
}

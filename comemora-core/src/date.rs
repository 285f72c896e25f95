//! Commemorative date types.
//!
//! `CandidateDate` is the seeded, trusted record; `FormattedDate` is what the
//! pipeline hands back to callers after reconciling model output against the
//! candidate table. Everything in this domain is a whole-day date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ComemoraError, ComemoraResult};

/// Wire format for all dates: YYYY-MM-DD.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A candidate commemorative date from the seeded date table.
///
/// Source of truth, read-only from the pipeline's perspective. Tagged with up
/// to three niche labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDate {
    pub date: NaiveDate,
    pub description: String,
    /// Raw type label from the table ("holiday", "optional", ...), if any.
    pub kind: Option<String>,
    pub niches: Vec<String>,
}

/// Category of a date as presented to the calendar UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateCategory {
    Commemorative,
    Holiday,
    Optional,
}

impl DateCategory {
    /// Derive a category from the raw stored type, lower-cased.
    /// Anything unrecognized defaults to `Commemorative`.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("holiday") => DateCategory::Holiday,
            Some("optional") => DateCategory::Optional,
            _ => DateCategory::Commemorative,
        }
    }
}

/// A reconciled, trusted date ready for calendar rendering and campaign
/// creation. Every `FormattedDate` corresponds to a real, niche-matching
/// `CandidateDate` (the reconciler guarantees this).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattedDate {
    pub date: NaiveDate,
    pub title: String,
    pub category: DateCategory,
    pub description: String,
}

/// Parse a YYYY-MM-DD string from the date table.
pub fn parse_date(s: &str) -> ComemoraResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| {
        ComemoraError::DateStore(format!("Invalid date '{}'. Expected YYYY-MM-DD", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_from_known_types() {
        assert_eq!(DateCategory::from_raw(Some("holiday")), DateCategory::Holiday);
        assert_eq!(DateCategory::from_raw(Some("HOLIDAY")), DateCategory::Holiday);
        assert_eq!(DateCategory::from_raw(Some("optional")), DateCategory::Optional);
        assert_eq!(
            DateCategory::from_raw(Some("commemorative")),
            DateCategory::Commemorative
        );
    }

    #[test]
    fn category_defaults_to_commemorative() {
        assert_eq!(DateCategory::from_raw(None), DateCategory::Commemorative);
        assert_eq!(DateCategory::from_raw(Some("")), DateCategory::Commemorative);
        assert_eq!(
            DateCategory::from_raw(Some("something-else")),
            DateCategory::Commemorative
        );
    }

    #[test]
    fn parse_date_accepts_iso_only() {
        assert!(parse_date("2025-05-11").is_ok());
        assert!(parse_date("11/05/2025").is_err());
        assert!(parse_date("2025-13-01").is_err());
    }
}

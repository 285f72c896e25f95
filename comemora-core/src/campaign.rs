//! Campaign types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A marketing campaign, optionally seeded from a commemorative date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer: Option<String>,

    /// The commemorative date this campaign was seeded from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_date: Option<NaiveDate>,

    #[serde(default)]
    pub from_commemorative: bool,
}

impl Campaign {
    /// A manually created campaign.
    pub fn new(name: String, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Campaign {
            id: Uuid::new_v4(),
            name,
            start_date,
            end_date,
            objective: None,
            description: None,
            offer: None,
            origin_date: None,
            from_commemorative: false,
        }
    }

    /// A campaign seeded from a commemorative date: single-day span on the
    /// date itself, flagged so the auto-creator can recognize it later.
    pub fn from_selection(selection: &DateSelection) -> Self {
        Campaign {
            id: Uuid::new_v4(),
            name: selection.title.trim().to_string(),
            start_date: selection.date,
            end_date: selection.date,
            objective: None,
            description: selection.description.clone(),
            offer: None,
            origin_date: Some(selection.date),
            from_commemorative: true,
        }
    }
}

/// One date picked by the user for automatic campaign creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateSelection {
    pub date: NaiveDate,
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl DateSelection {
    /// Uniqueness key within one batch: (date, trimmed title). A selection
    /// listing the same date and title twice is inserted once.
    pub fn key(&self) -> (NaiveDate, String) {
        (self.date, self.title.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_key_ignores_surrounding_whitespace() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 11).unwrap();
        let a = DateSelection {
            date,
            title: "Dia das Mães".to_string(),
            description: None,
        };
        let b = DateSelection {
            date,
            title: "  Dia das Mães ".to_string(),
            description: None,
        };
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn from_selection_spans_the_origin_date() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 11).unwrap();
        let campaign = Campaign::from_selection(&DateSelection {
            date,
            title: "Dia das Mães".to_string(),
            description: Some("Campanha de Dia das Mães".to_string()),
        });
        assert_eq!(campaign.start_date, date);
        assert_eq!(campaign.end_date, date);
        assert_eq!(campaign.origin_date, Some(date));
        assert!(campaign.from_commemorative);
    }
}

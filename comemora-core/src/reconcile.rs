//! Reconciliation of model output against the trusted candidate table.
//!
//! The model's claims about a date's title, description or category are never
//! trusted: those fields are always recovered from the stored record matching
//! on the date value. Dates the store does not know are dropped as
//! hallucinations (logged, never fatal).

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::date::{CandidateDate, DateCategory, FormattedDate};
use crate::niche;
use crate::relevance::RankedDate;

/// Cross-reference ranked dates against the candidates they were built from.
///
/// Guarantees on the output:
/// - every item corresponds 1:1 to a real candidate matching the labels
/// - deduplicated by date, input order preserved
/// - possibly empty, never larger than the distinct candidate dates
pub fn reconcile(
    ranked: &[RankedDate],
    candidates: &[CandidateDate],
    labels: &[String],
) -> Vec<FormattedDate> {
    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut reconciled = Vec::new();

    for item in ranked {
        let Some(date) = item.parsed_date() else {
            warn!(date = %item.date, "dropping ranked item with unparseable date");
            continue;
        };

        let Some(candidate) = candidates.iter().find(|c| c.date == date) else {
            warn!(%date, "dropping hallucinated date absent from the candidate table");
            continue;
        };

        // The model may drift from the niche constraint it was given.
        if !niche::matches_any(candidate, labels) {
            warn!(%date, "dropping ranked date that does not match the requested niches");
            continue;
        }

        if !seen.insert(date) {
            debug!(%date, "dropping duplicate ranked date");
            continue;
        }

        reconciled.push(FormattedDate {
            date,
            title: candidate.description.clone(),
            category: DateCategory::from_raw(candidate.kind.as_deref()),
            description: candidate.description.clone(),
        });
    }

    reconciled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relevance::Relevance;

    fn make_candidate(date: &str, description: &str, niches: &[&str]) -> CandidateDate {
        CandidateDate {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: description.to_string(),
            kind: Some("holiday".to_string()),
            niches: niches.iter().map(|n| n.to_string()).collect(),
        }
    }

    fn make_ranked(date: &str) -> RankedDate {
        RankedDate {
            date: date.to_string(),
            relevance: Relevance::High,
            reason: "relevant".to_string(),
        }
    }

    #[test]
    fn recovers_canonical_fields_from_the_candidate() {
        let candidates = vec![make_candidate("2025-05-11", "Dia das Mães", &["moda"])];
        let ranked = vec![make_ranked("2025-05-11")];

        let out = reconcile(&ranked, &candidates, &["moda".to_string()]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Dia das Mães");
        assert_eq!(out[0].description, "Dia das Mães");
        assert_eq!(out[0].category, DateCategory::Holiday);
    }

    #[test]
    fn drops_hallucinated_dates() {
        let candidates = vec![make_candidate("2025-05-11", "Dia das Mães", &["moda"])];
        let ranked = vec![make_ranked("2025-05-11"), make_ranked("2025-12-25")];

        let out = reconcile(&ranked, &candidates, &["moda".to_string()]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].date, NaiveDate::from_ymd_opt(2025, 5, 11).unwrap());
    }

    #[test]
    fn drops_dates_that_no_longer_match_the_niches() {
        let candidates = vec![
            make_candidate("2025-05-11", "Dia das Mães", &["moda"]),
            make_candidate("2025-06-12", "Dia dos Namorados", &["gastronomia"]),
        ];
        let ranked = vec![make_ranked("2025-05-11"), make_ranked("2025-06-12")];

        let out = reconcile(&ranked, &candidates, &["moda".to_string()]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn deduplicates_by_date() {
        let candidates = vec![make_candidate("2025-05-11", "Dia das Mães", &["moda"])];
        let ranked = vec![make_ranked("2025-05-11"), make_ranked("2025-05-11")];

        let out = reconcile(&ranked, &candidates, &["moda".to_string()]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn output_dates_are_a_subset_of_candidate_dates() {
        let candidates = vec![
            make_candidate("2025-05-11", "Dia das Mães", &["moda"]),
            make_candidate("2025-11-29", "Black Friday", &["moda", "tecnologia"]),
        ];
        let ranked = vec![
            make_ranked("2025-05-11"),
            make_ranked("2025-11-29"),
            make_ranked("2026-01-01"),
        ];

        let out = reconcile(&ranked, &candidates, &["moda".to_string()]);
        let candidate_dates: HashSet<NaiveDate> = candidates.iter().map(|c| c.date).collect();
        assert!(out.iter().all(|f| candidate_dates.contains(&f.date)));
    }
}

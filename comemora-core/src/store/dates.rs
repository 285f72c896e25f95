//! Candidate date table loader.
//!
//! Rows mirror the original table columns: date, description, type and up to
//! three niche labels. The table is externally seeded; malformed rows are
//! skipped with a warning, never fatal.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::date::{CandidateDate, parse_date};
use crate::error::ComemoraResult;

#[derive(Deserialize)]
struct DateRow {
    date: String,
    description: String,

    #[serde(rename = "type")]
    kind: Option<String>,

    niche1: Option<String>,
    niche2: Option<String>,
    niche3: Option<String>,
}

impl DateRow {
    fn niches(&self) -> Vec<String> {
        [&self.niche1, &self.niche2, &self.niche3]
            .into_iter()
            .flatten()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect()
    }
}

/// Load all candidate dates from the seeded table file.
///
/// A missing table reads as empty: the pipeline then produces no suggestions
/// rather than failing.
pub fn load(path: &Path) -> ComemoraResult<Vec<CandidateDate>> {
    if !path.exists() {
        warn!(path = %path.display(), "candidate date table not found, treating as empty");
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    let rows: Vec<serde_json::Value> = serde_json::from_str(&content)
        .map_err(|e| crate::error::ComemoraError::DateStore(format!("{}: {}", path.display(), e)))?;

    let mut candidates = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        let row: DateRow = match serde_json::from_value(row) {
            Ok(row) => row,
            Err(e) => {
                warn!(index, error = %e, "skipping malformed date row");
                continue;
            }
        };
        let date = match parse_date(&row.date) {
            Ok(date) => date,
            Err(e) => {
                warn!(index, error = %e, "skipping date row with invalid date");
                continue;
            }
        };
        candidates.push(CandidateDate {
            date,
            niches: row.niches(),
            description: row.description,
            kind: row.kind,
        });
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_table(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dates.json");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_rows_and_collects_niche_columns() {
        let (_dir, path) = write_table(
            r#"[
                {"date": "2025-05-11", "description": "Dia das Mães", "type": "holiday",
                 "niche1": "moda", "niche2": "beleza", "niche3": ""},
                {"date": "2025-11-29", "description": "Black Friday", "type": "commemorative",
                 "niche1": "tecnologia"}
            ]"#,
        );

        let candidates = load(&path).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].niches, vec!["moda", "beleza"]);
        assert_eq!(candidates[1].niches, vec!["tecnologia"]);
        assert_eq!(candidates[0].kind.as_deref(), Some("holiday"));
    }

    #[test]
    fn skips_malformed_rows() {
        let (_dir, path) = write_table(
            r#"[
                {"date": "2025-05-11", "description": "Dia das Mães"},
                {"description": "missing date"},
                {"date": "not-a-date", "description": "bad date"}
            ]"#,
        );

        let candidates = load(&path).unwrap();
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn missing_table_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let candidates = load(&dir.path().join("dates.json")).unwrap();
        assert!(candidates.is_empty());
    }
}

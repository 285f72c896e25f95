//! Campaign file storage.
//!
//! One TOML file per campaign inside the calendar directory, named after the
//! start date and slugified name, with numeric suffixes (-2, -3, ...) on
//! collisions.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::slugify;
use crate::campaign::{Campaign, DateSelection};
use crate::date::DATE_FORMAT;
use crate::error::{ComemoraError, ComemoraResult};

/// A campaign stored as a local TOML file.
pub struct LocalCampaign {
    pub path: PathBuf,
    pub campaign: Campaign,
}

/// Counts reported after an auto-create batch.
#[derive(Debug, Default, Serialize)]
pub struct AutoCreateOutcome {
    pub created: usize,
    pub skipped: usize,
}

/// List all campaigns in a calendar directory, sorted by start date.
pub fn list(dir: &Path) -> ComemoraResult<Vec<LocalCampaign>> {
    let mut campaigns = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.extension().map(|e| e == "toml").unwrap_or(false) {
            continue;
        }
        match read_campaign(&path) {
            Ok(campaign) => campaigns.push(LocalCampaign { path, campaign }),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable campaign file"),
        }
    }

    campaigns.sort_by(|a, b| {
        (a.campaign.start_date, &a.campaign.name).cmp(&(b.campaign.start_date, &b.campaign.name))
    });
    Ok(campaigns)
}

fn read_campaign(path: &Path) -> ComemoraResult<Campaign> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ComemoraError::Serialization(e.to_string()))
}

/// Write one campaign file, handling filename collisions.
pub fn create(dir: &Path, campaign: &Campaign) -> ComemoraResult<LocalCampaign> {
    let content =
        toml::to_string_pretty(campaign).map_err(|e| ComemoraError::Serialization(e.to_string()))?;
    let filename = unique_filename(dir, &base_filename(campaign));
    let path = dir.join(filename);
    std::fs::write(&path, content)?;

    Ok(LocalCampaign {
        path,
        campaign: campaign.clone(),
    })
}

/// Idempotently create campaigns for the selected dates.
///
/// Per tuple: skip if the same (date, title) already appeared in this batch,
/// skip if a from-commemorative campaign with the same origin date and name
/// already exists, otherwise insert. The existence check and the insert are
/// not atomic: two concurrent invocations can both pass the check and write
/// duplicates. A failed write aborts the remaining tuples; earlier inserts
/// stay.
pub fn auto_create(dir: &Path, selections: &[DateSelection]) -> ComemoraResult<AutoCreateOutcome> {
    let existing = list(dir)?;
    let mut processed: HashSet<(NaiveDate, String)> = HashSet::new();
    let mut outcome = AutoCreateOutcome::default();

    for selection in selections {
        if !processed.insert(selection.key()) {
            debug!(date = %selection.date, title = %selection.title, "duplicate selection in batch, skipping");
            outcome.skipped += 1;
            continue;
        }

        if already_exists(&existing, selection) {
            debug!(date = %selection.date, title = %selection.title, "campaign already exists, skipping");
            outcome.skipped += 1;
            continue;
        }

        create(dir, &Campaign::from_selection(selection))?;
        outcome.created += 1;
    }

    info!(
        created = outcome.created,
        skipped = outcome.skipped,
        "auto-create batch finished"
    );
    Ok(outcome)
}

fn already_exists(existing: &[LocalCampaign], selection: &DateSelection) -> bool {
    existing.iter().any(|local| {
        local.campaign.from_commemorative
            && local.campaign.origin_date == Some(selection.date)
            && local.campaign.name.trim() == selection.title.trim()
    })
}

fn base_filename(campaign: &Campaign) -> String {
    format!(
        "{}__{}.toml",
        campaign.start_date.format(DATE_FORMAT),
        slugify(&campaign.name)
    )
}

/// Add -2, -3, ... suffixes until the filename is free.
fn unique_filename(dir: &Path, base: &str) -> String {
    if !dir.join(base).exists() {
        return base.to_string();
    }

    let stem = base.trim_end_matches(".toml");
    let mut suffix = 2;
    loop {
        let candidate = format!("{}-{}.toml", stem, suffix);
        if !dir.join(&candidate).exists() {
            return candidate;
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_selection(date: &str, title: &str) -> DateSelection {
        DateSelection {
            date: NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap(),
            title: title.to_string(),
            description: Some(format!("Campanha: {}", title)),
        }
    }

    #[test]
    fn create_and_list_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let campaign = Campaign::from_selection(&make_selection("2025-05-11", "Dia das Mães"));
        create(dir.path(), &campaign).unwrap();

        let listed = list(dir.path()).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].campaign.id, campaign.id);
        assert_eq!(listed[0].campaign.name, "Dia das Mães");
        assert!(listed[0].campaign.from_commemorative);
    }

    #[test]
    fn listing_sorts_by_start_date() {
        let dir = tempfile::tempdir().unwrap();
        create(
            dir.path(),
            &Campaign::from_selection(&make_selection("2025-11-29", "Black Friday")),
        )
        .unwrap();
        create(
            dir.path(),
            &Campaign::from_selection(&make_selection("2025-05-11", "Dia das Mães")),
        )
        .unwrap();

        let listed = list(dir.path()).unwrap();
        assert_eq!(listed[0].campaign.name, "Dia das Mães");
        assert_eq!(listed[1].campaign.name, "Black Friday");
    }

    #[test]
    fn filename_collisions_get_numeric_suffixes() {
        let dir = tempfile::tempdir().unwrap();
        let selection = make_selection("2025-05-11", "Dia das Mães");
        // Manual campaigns are not deduplicated, so two identical ones may
        // legitimately coexist as files.
        let mut first = Campaign::from_selection(&selection);
        first.from_commemorative = false;
        let mut second = Campaign::from_selection(&selection);
        second.from_commemorative = false;

        let a = create(dir.path(), &first).unwrap();
        let b = create(dir.path(), &second).unwrap();

        assert_eq!(a.path.file_name().unwrap(), "2025-05-11__dia-das-mães.toml");
        assert_eq!(b.path.file_name().unwrap(), "2025-05-11__dia-das-mães-2.toml");
        assert_eq!(list(dir.path()).unwrap().len(), 2);
    }

    #[test]
    fn auto_create_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let selections = vec![
            make_selection("2025-05-11", "Dia das Mães"),
            make_selection("2025-11-29", "Black Friday"),
        ];

        let first = auto_create(dir.path(), &selections).unwrap();
        assert_eq!(first.created, 2);
        assert_eq!(first.skipped, 0);

        let second = auto_create(dir.path(), &selections).unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped, 2);
        assert_eq!(list(dir.path()).unwrap().len(), 2);
    }

    #[test]
    fn duplicate_tuples_within_a_batch_insert_once() {
        let dir = tempfile::tempdir().unwrap();
        let selections = vec![
            make_selection("2025-05-11", "Dia das Mães"),
            make_selection("2025-05-11", "Dia das Mães"),
        ];

        let outcome = auto_create(dir.path(), &selections).unwrap();
        assert_eq!(outcome.created, 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(list(dir.path()).unwrap().len(), 1);
    }

    #[test]
    fn manual_campaigns_do_not_block_auto_creation() {
        let dir = tempfile::tempdir().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 5, 11).unwrap();
        let mut manual = Campaign::new("Dia das Mães".to_string(), date, date);
        manual.origin_date = Some(date);
        create(dir.path(), &manual).unwrap();

        let outcome =
            auto_create(dir.path(), &[make_selection("2025-05-11", "Dia das Mães")]).unwrap();
        assert_eq!(outcome.created, 1);
    }
}

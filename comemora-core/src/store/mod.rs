//! Local file storage for the comemora data directory.
//!
//! The data directory holds the seeded candidate date table (`dates.json`)
//! and one subdirectory per calendar, each containing one TOML file per
//! campaign. The date table is externally maintained; comemora only reads it.

mod campaigns;
mod dates;

pub use campaigns::{AutoCreateOutcome, LocalCampaign};

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::campaign::{Campaign, DateSelection};
use crate::config::GlobalConfig;
use crate::date::CandidateDate;
use crate::error::{ComemoraError, ComemoraResult};

const DATES_FILE: &str = "dates.json";

/// Handle on the comemora data directory.
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Open (creating if needed) the configured data directory.
    pub fn open(config: &GlobalConfig) -> ComemoraResult<Self> {
        let root = config.data_dir();
        std::fs::create_dir_all(&root)?;
        Ok(Store { root })
    }

    /// A store rooted at an explicit path. Used by tests and tooling.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Store { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the full candidate date table.
    pub fn candidate_dates(&self) -> ComemoraResult<Vec<CandidateDate>> {
        dates::load(&self.root.join(DATES_FILE))
    }

    /// List calendar slugs, sorted.
    pub fn calendars(&self) -> ComemoraResult<Vec<String>> {
        let mut calendars = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.path().is_dir() {
                calendars.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        calendars.sort();
        Ok(calendars)
    }

    /// Create a calendar directory, returning its slug.
    pub fn create_calendar(&self, name: &str) -> ComemoraResult<String> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(ComemoraError::InvalidRequest(format!(
                "'{}' does not produce a usable calendar name",
                name
            )));
        }
        std::fs::create_dir_all(self.root.join(&slug))?;
        Ok(slug)
    }

    fn calendar_dir(&self, calendar: &str) -> ComemoraResult<PathBuf> {
        let dir = self.root.join(calendar);
        if !dir.is_dir() {
            return Err(ComemoraError::CalendarNotFound(calendar.to_string()));
        }
        Ok(dir)
    }

    /// List a calendar's campaigns, sorted by start date.
    pub fn campaigns(&self, calendar: &str) -> ComemoraResult<Vec<LocalCampaign>> {
        campaigns::list(&self.calendar_dir(calendar)?)
    }

    /// Persist one campaign in the calendar directory.
    pub fn create_campaign(
        &self,
        calendar: &str,
        campaign: &Campaign,
    ) -> ComemoraResult<LocalCampaign> {
        campaigns::create(&self.calendar_dir(calendar)?, campaign)
    }

    /// Look up a campaign by id.
    pub fn get_campaign(&self, calendar: &str, id: Uuid) -> ComemoraResult<LocalCampaign> {
        let dir = self.calendar_dir(calendar)?;
        campaigns::list(&dir)?
            .into_iter()
            .find(|c| c.campaign.id == id)
            .ok_or_else(|| ComemoraError::CampaignNotFound(id.to_string()))
    }

    /// Delete a campaign by id.
    pub fn delete_campaign(&self, calendar: &str, id: Uuid) -> ComemoraResult<()> {
        let local = self.get_campaign(calendar, id)?;
        std::fs::remove_file(&local.path)?;
        Ok(())
    }

    /// Idempotently create campaigns from the user's selected dates.
    pub fn auto_create_campaigns(
        &self,
        calendar: &str,
        selections: &[DateSelection],
    ) -> ComemoraResult<AutoCreateOutcome> {
        campaigns::auto_create(&self.calendar_dir(calendar)?, selections)
    }
}

/// Convert a string to a filename-safe slug.
pub(crate) fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(50)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Loja de Moda"), "loja-de-moda");
        assert_eq!(slugify("Campanha: Dia das Mães!"), "campanha-dia-das-mães");
        assert_eq!(slugify("  Lots   of   spaces  "), "lots-of-spaces");
    }

    #[test]
    fn test_slugify_truncates_long_names() {
        let long = "a".repeat(100);
        assert_eq!(slugify(&long).len(), 50);
    }

    #[test]
    fn unknown_calendar_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::at(dir.path());
        assert!(matches!(
            store.campaigns("missing"),
            Err(ComemoraError::CalendarNotFound(_))
        ));
    }

    #[test]
    fn create_calendar_slugifies_and_lists() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::at(dir.path());
        let slug = store.create_calendar("Loja de Moda").unwrap();
        assert_eq!(slug, "loja-de-moda");
        assert_eq!(store.calendars().unwrap(), vec!["loja-de-moda"]);
    }
}

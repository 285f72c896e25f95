//! TUI rendering traits for comemora types.
//!
//! Extension traits that add colored terminal rendering to comemora-core
//! types using owo_colors.

use comemora_core::campaign::Campaign;
use comemora_core::date::{DateCategory, FormattedDate};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for DateCategory {
    fn render(&self) -> String {
        match self {
            DateCategory::Commemorative => "commemorative".green().to_string(),
            DateCategory::Holiday => "holiday".red().to_string(),
            DateCategory::Optional => "optional".yellow().to_string(),
        }
    }
}

impl Render for FormattedDate {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.date.format("%Y-%m-%d").to_string().dimmed(),
            self.title.bold(),
            self.category.render()
        )
    }
}

impl Render for Campaign {
    fn render(&self) -> String {
        let span = if self.start_date == self.end_date {
            self.start_date.format("%d/%m/%Y").to_string()
        } else {
            format!(
                "{} → {}",
                self.start_date.format("%d/%m/%Y"),
                self.end_date.format("%d/%m/%Y")
            )
        };

        let origin = if self.from_commemorative {
            " (from commemorative date)".dimmed().to_string()
        } else {
            String::new()
        };

        format!("{} {}{}", span.dimmed(), self.name.bold(), origin)
    }
}

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands::open_store;

pub fn list() -> Result<()> {
    let (_config, store) = open_store()?;
    let calendars = store.calendars()?;

    if calendars.is_empty() {
        println!(
            "{}",
            "No calendars yet. Create one with: comemora new-calendar <name>".dimmed()
        );
        return Ok(());
    }

    for calendar in calendars {
        println!("📅 {}", calendar);
    }

    Ok(())
}

pub fn create(name: &str) -> Result<()> {
    let (_config, store) = open_store()?;
    let slug = store.create_calendar(name)?;
    println!("Created calendar {}", slug.bold());
    Ok(())
}

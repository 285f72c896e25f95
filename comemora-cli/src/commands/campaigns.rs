use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands::open_store;
use crate::render::Render;

pub fn list(calendar: &str) -> Result<()> {
    let (_config, store) = open_store()?;
    let campaigns = store.campaigns(calendar)?;

    if campaigns.is_empty() {
        println!("{}", "No campaigns in this calendar".dimmed());
        return Ok(());
    }

    for local in &campaigns {
        println!("  {}", local.campaign.render());
    }

    Ok(())
}

use anyhow::Result;
use owo_colors::OwoColorize;

use comemora_core::campaign::DateSelection;
use comemora_core::llm::LlmClient;
use comemora_core::suggest::suggest_dates;

use crate::commands::open_store;
use crate::render::Render;

/// The one-click flow: suggest dates for the niches, then create one
/// campaign per suggestion (existing ones are skipped, not duplicated).
pub async fn run(calendar: &str, niches: &[String]) -> Result<()> {
    let (config, store) = open_store()?;
    let llm = LlmClient::new(config.llm.clone())?;

    let dates = suggest_dates(&store, &llm, niches).await?;
    if dates.is_empty() {
        println!("{}", "No relevant dates found for those niches".dimmed());
        return Ok(());
    }

    for date in &dates {
        println!("  {}", date.render());
    }

    let selections: Vec<DateSelection> = dates
        .iter()
        .map(|date| DateSelection {
            date: date.date,
            title: date.title.clone(),
            description: Some(date.description.clone()),
        })
        .collect();

    let outcome = store.auto_create_campaigns(calendar, &selections)?;
    println!(
        "{} ({} skipped)",
        format!("Created {} campaigns", outcome.created).bold(),
        outcome.skipped
    );

    Ok(())
}

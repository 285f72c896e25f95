use anyhow::Result;
use owo_colors::OwoColorize;

use comemora_core::llm::LlmClient;
use comemora_core::suggest::suggest_dates;

use crate::commands::open_store;
use crate::render::Render;

pub async fn run(niches: &[String]) -> Result<()> {
    let (config, store) = open_store()?;
    let llm = LlmClient::new(config.llm.clone())?;

    let dates = suggest_dates(&store, &llm, niches).await?;

    if dates.is_empty() {
        println!("{}", "No relevant dates found for those niches".dimmed());
        return Ok(());
    }

    println!("{}", format!("{} suggested dates:", dates.len()).bold());
    for date in &dates {
        println!("  {}", date.render());
    }

    Ok(())
}

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use owo_colors::OwoColorize;

use comemora_core::campaign::Campaign;
use comemora_core::export;

use crate::ExportFormat;
use crate::commands::open_store;

pub fn run(
    calendar: &str,
    format: ExportFormat,
    out: Option<&str>,
    month: Option<&str>,
) -> Result<()> {
    let (_config, store) = open_store()?;
    let campaigns: Vec<Campaign> = store
        .campaigns(calendar)?
        .into_iter()
        .map(|local| local.campaign)
        .collect();

    if campaigns.is_empty() {
        bail!("Calendar '{}' has no campaigns to export", calendar);
    }

    let (bytes, extension) = match format {
        ExportFormat::Csv => (export::render_csv(&campaigns).into_bytes(), "csv"),
        ExportFormat::Pdf => (export::render_pdf(&campaigns, parse_month(month)?)?, "pdf"),
    };

    let path = out
        .map(|p| p.to_string())
        .unwrap_or_else(|| format!("{}-campanhas.{}", calendar, extension));

    std::fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path))?;
    println!("Wrote {}", path.bold());

    Ok(())
}

fn parse_month(month: Option<&str>) -> Result<NaiveDate> {
    match month {
        Some(raw) => NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid month '{}'. Expected YYYY-MM", raw)),
        None => Ok(Utc::now().date_naive()),
    }
}

mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "comemora")]
#[command(about = "Plan marketing campaigns around commemorative dates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest relevant commemorative dates for business niches
    Suggest {
        /// Comma-separated niche codes (e.g. "fashion,healthcare")
        #[arg(short, long, value_delimiter = ',', required = true)]
        niches: Vec<String>,
    },
    /// List calendars
    Calendars,
    /// Create a new calendar
    NewCalendar {
        name: String,
    },
    /// List a calendar's campaigns
    Campaigns {
        calendar: String,
    },
    /// Suggest dates for the niches and create one campaign per suggestion
    Plan {
        calendar: String,

        /// Comma-separated niche codes (e.g. "fashion,healthcare")
        #[arg(short, long, value_delimiter = ',', required = true)]
        niches: Vec<String>,
    },
    /// Export a calendar's campaigns to a file
    Export {
        calendar: String,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output path (defaults to <calendar>-campanhas.<ext>)
        #[arg(short, long)]
        out: Option<String>,

        /// Month for the PDF grid page (YYYY-MM, defaults to the current month)
        #[arg(long)]
        month: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Suggest { niches } => commands::suggest::run(&niches).await,
        Commands::Calendars => commands::calendars::list(),
        Commands::NewCalendar { name } => commands::calendars::create(&name),
        Commands::Campaigns { calendar } => commands::campaigns::list(&calendar),
        Commands::Plan { calendar, niches } => commands::plan::run(&calendar, &niches).await,
        Commands::Export {
            calendar,
            format,
            out,
            month,
        } => commands::export::run(&calendar, format, out.as_deref(), month.as_deref()),
    }
}

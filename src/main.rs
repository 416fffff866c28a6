use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use medisync_lib::config::{self, AnalyzerConfig};
use medisync_lib::models::{Sex, UserProfile, FALLBACK_AGE_YEARS};
use medisync_lib::{init_tracing, ReportAnalyzer};

#[derive(Parser, Debug)]
#[command(name = "medisync", version, about = "Analyze OCR text from medical lab reports.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract and assess lab values from a text file.
    Analyze {
        /// OCR text of the report.
        file: PathBuf,
        /// Age in years.
        #[arg(long)]
        age: Option<i64>,
        /// male, female or other.
        #[arg(long)]
        sex: Option<Sex>,
        /// Observation date (YYYY-MM-DD), today if omitted.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Analyzer settings (JSON). Defaults to the per-user config file if present.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the chat message instead of JSON.
        #[arg(long)]
        chat: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            file,
            age,
            sex,
            date,
            config: config_path,
            chat,
        } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Cannot read report text from {:?}", file))?;

            let config_path = config_path.or_else(config::default_config_path);
            let settings = AnalyzerConfig::load_or_default(config_path.as_deref())?;

            let profile = match (age, sex) {
                (None, None) => UserProfile::default(),
                (age, sex) => UserProfile::new(
                    age.unwrap_or(i64::from(FALLBACK_AGE_YEARS)),
                    sex.unwrap_or(Sex::Other),
                )?,
            };
            let observed_on = date.unwrap_or_else(|| chrono::Local::now().date_naive());

            let max_normal_listed = settings.max_normal_listed;
            let analyzer = ReportAnalyzer::new(profile, settings);
            let result = analyzer.analyze(&text, observed_on);

            if chat {
                print!("{}", result.chat_message(max_normal_listed));
            } else {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }
    }

    Ok(())
}

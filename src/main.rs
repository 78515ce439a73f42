//! `scout`: runs a discussion search, or inspects stored reports.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use discussion_scout::config::{load_config_default, load_config_from, SearchConfig};
use discussion_scout::extract::extract_discussions_at;
use discussion_scout::topics::generate_daily_query;
use discussion_scout::{build_client, run_report, AnswerPayload, DailyReport, ReportStore};

#[derive(Parser, Debug)]
#[command(name = "scout", version, about = "Find and extract online discussions")]
struct Cli {
    /// Config file (TOML or JSON); defaults to $SCOUT_CONFIG_PATH or config/search.*
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Query the answer API and store the resulting report
    Search {
        /// Custom query instead of the daily research brief
        #[arg(long)]
        query: Option<String>,
        /// Print the report without saving it
        #[arg(long)]
        no_save: bool,
    },
    /// Run extraction on a saved answer text (offline)
    Extract {
        file: PathBuf,
    },
    /// Inspect stored reports
    Reports {
        #[command(subcommand)]
        action: ReportsAction,
    },
}

#[derive(Subcommand, Debug)]
enum ReportsAction {
    List,
    Show { id: String },
    Today,
    Delete { id: String },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("discussion_scout=info,extract=info,warn"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json().with_writer(std::io::stderr)).init();
    } else {
        registry.with(fmt::layer().compact().with_writer(std::io::stderr)).init();
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<SearchConfig> {
    match path {
        Some(p) => load_config_from(p),
        None => load_config_default(),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let cfg = load_config(cli.config.as_ref())?;
    let store = ReportStore::from_config(&cfg.store);

    match cli.command {
        Command::Search { query, no_save } => {
            let query = query.unwrap_or_else(generate_daily_query);
            let client = build_client(&cfg)?;
            let report = match run_report(client.as_ref(), &query, &cfg.extract).await {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!(error = %e, "search failed");
                    if !no_save && !e.is_config() {
                        store.save(&DailyReport::failed(Utc::now(), &query))?;
                    }
                    return Err(e.into());
                }
            };
            if !no_save {
                store.save(&report)?;
                tracing::info!(id = %report.id, path = %store.path().display(), "report saved");
            }
            print_json(&report)?;
        }
        Command::Extract { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let payload = AnswerPayload::text(content);
            let discussions = extract_discussions_at(Utc::now(), &payload, &cfg.extract);
            print_json(&discussions)?;
        }
        Command::Reports { action } => match action {
            ReportsAction::List => {
                for r in store.reports() {
                    println!(
                        "{}  {}  {}  {} discussions",
                        r.id,
                        r.date,
                        r.status,
                        r.discussions.len()
                    );
                }
            }
            ReportsAction::Show { id } => match store.get(&id) {
                Some(r) => print_json(&r)?,
                None => anyhow::bail!("no report with id {id}"),
            },
            ReportsAction::Today => match store.todays(Utc::now()) {
                Some(r) => print_json(&r)?,
                None => println!("no report for today"),
            },
            ReportsAction::Delete { id } => {
                if store.delete(&id)? {
                    println!("deleted {id}");
                } else {
                    println!("no report with id {id}");
                }
            }
        },
    }

    Ok(())
}

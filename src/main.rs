use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use lbh_score::error::{LbhError, LbhResult};
use lbh_score::input::{load_dataset, write_dataset};
use lbh_score::input::store::{ScoreStore, load_store};
use lbh_score::logging::init_tracing;
use lbh_score::model::scores::{ScoreFactor, ScoreResult};
use lbh_score::model::signals::SignalBundle;
use lbh_score::model::weights::ScoringProfile;
use lbh_score::pipeline::check::{builtin_scenarios, run_check};
use lbh_score::pipeline::detail::restaurant_detail;
use lbh_score::pipeline::listing::{ListingQuery, list_restaurants};
use lbh_score::pipeline::review::{NewReview, add_review};
use lbh_score::pipeline::stage2_score::{Stage2Inputs, run_stage2};
use lbh_score::pipeline::stage3_report::write_reports;
use lbh_score::scoring::score;

#[derive(Debug, Parser)]
#[command(name = "lbh-score", version)]
#[command(about = "Local Business Health scoring for restaurants")]
struct Cli {
    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rescore restaurants, update the score store and write reports
    Run {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Rescore only this restaurant
        #[arg(long)]
        restaurant_id: Option<String>,
        /// RFC 3339 timestamp recorded as last_scored_at (default: now)
        #[arg(long, value_parser = parse_scored_at)]
        scored_at: Option<DateTime<Utc>>,
    },
    /// Print one restaurant with its latest reviews and LBH score
    Detail {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        id: String,
        #[arg(long)]
        scores: Option<PathBuf>,
    },
    /// Print restaurants joined with persisted scores
    List {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        scores: Option<PathBuf>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        cuisine: Option<String>,
        #[arg(long, default_value_t = 0.0)]
        min_lbh: f64,
        #[arg(long, default_value_t = 20)]
        limit: usize,
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
    /// Append a review to the dataset file and rewrite it in place
    Review {
        #[arg(long)]
        data: PathBuf,
        #[arg(long)]
        restaurant_id: String,
        #[arg(long, allow_negative_numbers = true)]
        rating: f64,
        #[arg(long)]
        text: Option<String>,
        /// RFC 3339 timestamp recorded as created_at (default: now)
        #[arg(long, value_parser = parse_scored_at)]
        created_at: Option<DateTime<Utc>>,
    },
    /// Score one signal bundle read from a JSON file
    Score {
        #[arg(long)]
        signals: PathBuf,
    },
    /// Score fixed scenarios and verify them against tolerance bands
    Check,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(err) = run(cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> LbhResult<()> {
    match cli.command {
        Command::Run {
            data,
            out,
            restaurant_id,
            scored_at,
        } => {
            let dataset = load_dataset(&data)?;
            let profile = ScoringProfile::default_v1();
            let output = run_stage2(&Stage2Inputs {
                dataset: &dataset,
                restaurant_id: restaurant_id.as_deref(),
                scored_at: scored_at.unwrap_or_else(Utc::now),
                profile: &profile,
            });
            let paths = write_reports(&output, &out)?;
            tracing::info!(
                processed = output.rows.len(),
                out = %paths.report_txt.display(),
                "rescore complete"
            );
            print_json(&serde_json::json!({
                "status": "ok",
                "processed": output.rows.len(),
            }))
        }
        Command::Detail { data, id, scores } => {
            let dataset = load_dataset(&data)?;
            let store = load_optional_store(scores.as_deref())?;
            let detail = restaurant_detail(&dataset, &store, &id)?;
            print_json(&detail)
        }
        Command::List {
            data,
            scores,
            city,
            cuisine,
            min_lbh,
            limit,
            offset,
        } => {
            if !min_lbh.is_finite() {
                return Err(LbhError::InvalidArgument(
                    "--min-lbh must be a finite number".to_string(),
                ));
            }
            let dataset = load_dataset(&data)?;
            let store = load_optional_store(scores.as_deref())?;
            let query = ListingQuery {
                city,
                cuisine,
                min_lbh,
                limit,
                offset,
            };
            print_json(&list_restaurants(&dataset, &store, &query))
        }
        Command::Review {
            data,
            restaurant_id,
            rating,
            text,
            created_at,
        } => {
            let mut dataset = load_dataset(&data)?;
            let new_review = NewReview {
                restaurant_id,
                rating,
                text,
                created_at: created_at.unwrap_or_else(Utc::now),
            };
            let review = add_review(&mut dataset, new_review)?.clone();
            write_dataset(&data, &dataset)?;
            tracing::info!(
                restaurant_id = %review.restaurant_id,
                path = %data.display(),
                "review added"
            );
            print_json(&serde_json::json!({ "review": review }))
        }
        Command::Score { signals } => {
            let raw = std::fs::read_to_string(&signals)
                .map_err(|e| LbhError::InvalidArgument(format!("{}: {e}", signals.display())))?;
            let bundle: SignalBundle = serde_json::from_str(&raw)?;
            print_json(&ScoreView::new(score(&bundle)))
        }
        Command::Check => {
            let report = run_check(&builtin_scenarios());
            print_json(&report)?;
            if report.passed() {
                tracing::info!(checks = report.outcomes.len(), "all LBH checks passed");
                Ok(())
            } else {
                Err(LbhError::CheckFailed {
                    failed: report.failed(),
                    total: report.outcomes.len(),
                })
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct ScoreView {
    #[serde(flatten)]
    scores: ScoreResult,
    overall: u32,
    band: &'static str,
    grade: &'static str,
    factors: [ScoreFactor; 3],
}

impl ScoreView {
    fn new(scores: ScoreResult) -> Self {
        Self {
            scores,
            overall: scores.overall(),
            band: scores.band().label(),
            grade: scores.grade().as_str(),
            factors: scores.factors(),
        }
    }
}

fn parse_scored_at(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp {value:?}: {e}"))
}

fn load_optional_store(path: Option<&Path>) -> LbhResult<ScoreStore> {
    match path {
        Some(p) => Ok(load_store(p)?),
        None => Ok(ScoreStore::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> LbhResult<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, value)?;
    writeln!(lock)?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;

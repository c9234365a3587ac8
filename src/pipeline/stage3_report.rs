use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::SecondsFormat;

use crate::error::LbhResult;
use crate::input::store::{STORE_FILE_NAME, load_store, write_store};
use crate::model::bands::{HEALTHY_LBH, HealthBand, band_order};
use crate::pipeline::stage2_score::{ScoredRestaurant, Stage2Output};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    BandStat, RankedRestaurant, SummaryData, ToolMeta, format_score, fraction_where, named_stats,
};

const WATCH_LIST_LEN: usize = 3;

#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub store: PathBuf,
    pub scores_tsv: PathBuf,
    pub summary_json: PathBuf,
    pub report_txt: PathBuf,
}

pub fn write_reports(output: &Stage2Output<'_>, out_dir: &Path) -> LbhResult<ReportPaths> {
    fs::create_dir_all(out_dir)?;

    let store_path = out_dir.join(STORE_FILE_NAME);
    let mut store = load_store(&store_path)?;
    let mut replaced = 0usize;
    for row in &output.rows {
        if store.upsert(row.record.clone()) {
            replaced += 1;
        }
    }
    write_store(&store_path, &store)?;
    tracing::info!(
        path = %store_path.display(),
        upserted = output.rows.len(),
        replaced,
        total = store.len(),
        "score store updated"
    );

    let scores_path = out_dir.join("scores.tsv");
    write_scores_tsv(&output.rows, &scores_path)?;

    let summary = build_summary(output, store.len());
    let summary_path = out_dir.join("summary.json");
    write_text(&summary_path, &render_summary_json(&summary)?)?;

    let report_path = out_dir.join("report.txt");
    write_text(&report_path, &render_report_text(&summary))?;

    Ok(ReportPaths {
        store: store_path,
        scores_tsv: scores_path,
        summary_json: summary_path,
        report_txt: report_path,
    })
}

fn write_scores_tsv(rows: &[ScoredRestaurant<'_>], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "restaurant_id",
        "name",
        "n_ratings",
        "n_texts",
        "hours_change_count",
        "job_post_count",
        "lbh",
        "sentiment_score",
        "consistency_score",
        "stability_score",
        "band",
        "grade",
        "last_scored_at",
    ];
    writeln!(w, "{}", header.join("\t"))?;
    for row in rows {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            tsv_field(&row.restaurant.id),
            tsv_field(row.restaurant.display_name()),
            row.n_ratings,
            row.n_texts,
            row.hours_change_count,
            row.job_post_count,
            format_score(row.scores.lbh),
            format_score(row.scores.sentiment_score),
            format_score(row.scores.consistency_score),
            format_score(row.scores.stability_score),
            row.scores.band().label(),
            row.scores.grade().as_str(),
            row.record
                .last_scored_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        )?;
    }
    w.flush()
}

fn tsv_field(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

pub fn build_summary(output: &Stage2Output<'_>, n_store_records: usize) -> SummaryData {
    let lbh: Vec<f64> = output.rows.iter().map(|r| r.scores.lbh).collect();
    let sentiment: Vec<f64> = output
        .rows
        .iter()
        .map(|r| r.scores.sentiment_score)
        .collect();
    let consistency: Vec<f64> = output
        .rows
        .iter()
        .map(|r| r.scores.consistency_score)
        .collect();
    let stability: Vec<f64> = output
        .rows
        .iter()
        .map(|r| r.scores.stability_score)
        .collect();

    let n = output.rows.len();
    let bands = band_order()
        .iter()
        .map(|band| {
            let count = output
                .rows
                .iter()
                .filter(|r| HealthBand::from_lbh(r.scores.lbh) == *band)
                .count();
            BandStat {
                name: band.label(),
                count,
                fraction: if n == 0 { 0.0 } else { count as f64 / n as f64 },
            }
        })
        .collect();

    let mut ranked: Vec<&ScoredRestaurant<'_>> = output.rows.iter().collect();
    ranked.sort_by(|a, b| {
        a.scores
            .lbh
            .total_cmp(&b.scores.lbh)
            .then_with(|| a.restaurant.id.cmp(&b.restaurant.id))
    });
    let lowest = ranked
        .into_iter()
        .take(WATCH_LIST_LEN)
        .map(|r| RankedRestaurant {
            restaurant_id: r.restaurant.id.clone(),
            name: r.restaurant.display_name().to_string(),
            lbh: r.scores.lbh,
        })
        .collect();

    SummaryData {
        tool: ToolMeta {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        scored_at: output.scored_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        n_restaurants: n,
        n_store_records,
        clamped_ratings: output.clamped_ratings,
        scores: vec![
            named_stats("lbh", &lbh),
            named_stats("sentiment_score", &sentiment),
            named_stats("consistency_score", &consistency),
            named_stats("stability_score", &stability),
        ],
        bands,
        healthy_fraction: fraction_where(&lbh, |v| v >= HEALTHY_LBH),
        lowest,
    }
}

fn write_text(path: &Path, text: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(text.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_report.rs"]
mod tests;

pub mod json;
pub mod text;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct NamedStats {
    pub name: &'static str,
    pub median: f64,
    pub p10: f64,
    pub p90: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BandStat {
    pub name: &'static str,
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedRestaurant {
    pub restaurant_id: String,
    pub name: String,
    pub lbh: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub scored_at: String,
    pub n_restaurants: usize,
    pub n_store_records: usize,
    pub clamped_ratings: usize,
    pub scores: Vec<NamedStats>,
    pub bands: Vec<BandStat>,
    pub healthy_fraction: f64,
    pub lowest: Vec<RankedRestaurant>,
}

pub fn format_score(v: f64) -> String {
    format!("{:.2}", v)
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p10(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.10)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

pub fn named_stats(name: &'static str, values: &[f64]) -> NamedStats {
    NamedStats {
        name,
        median: median(values),
        p10: p10(values),
        p90: p90(values),
    }
}

pub fn fraction_where(values: &[f64], pred: impl Fn(f64) -> bool) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let count = values.iter().filter(|v| pred(**v)).count();
    count as f64 / values.len() as f64
}

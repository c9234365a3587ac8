use crate::report::{BandStat, SummaryData, format_score};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Local Business Health Report\n");
    out.push_str("============================\n\n");

    out.push_str("1. Run\n");
    out.push_str(&format!("Tool: {} {}\n", data.tool.name, data.tool.version));
    out.push_str(&format!("Scored at: {}\n", data.scored_at));
    out.push_str(&format!("Restaurants scored: {}\n", data.n_restaurants));
    out.push_str(&format!("Records in score store: {}\n\n", data.n_store_records));

    out.push_str("2. Score distribution\n");
    for s in &data.scores {
        out.push_str(&format!(
            "{}: median {}, p10 {}, p90 {}\n",
            s.name,
            format_score(s.median),
            format_score(s.p10),
            format_score(s.p90)
        ));
    }
    out.push('\n');

    out.push_str("3. Health bands\n");
    for b in &data.bands {
        out.push_str(&format!(
            "{}: {} ({})\n",
            b.name,
            b.count,
            format_percent(b.fraction)
        ));
    }
    out.push_str(&format!(
        "Healthy (LBH >= 60): {}\n",
        format_percent(data.healthy_fraction)
    ));
    out.push_str(&format!("Conclusion: {}\n\n", overall_statement(data)));

    out.push_str("4. Watch list\n");
    if data.lowest.is_empty() {
        out.push_str("No restaurants scored.\n");
    } else {
        for r in &data.lowest {
            out.push_str(&format!(
                "{} ({}): {}\n",
                r.name,
                r.restaurant_id,
                format_score(r.lbh)
            ));
        }
    }
    out.push('\n');

    out.push_str("5. Caveats\n");
    if data.clamped_ratings > 0 {
        out.push_str(&format!(
            "{} rating(s) outside 1-5 were clamped or ignored.\n",
            data.clamped_ratings
        ));
    }
    out.push_str("Text sentiment is a keyword heuristic, not a trained model.\n");
    out.push_str("Restaurants without ratings or reviews receive a neutral sentiment of 50.\n");

    out
}

fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

fn dominant_band(bands: &[BandStat]) -> Option<&BandStat> {
    bands
        .iter()
        .filter(|b| b.count > 0)
        .fold(None, |best: Option<&BandStat>, b| match best {
            Some(cur) if cur.count >= b.count => Some(cur),
            _ => Some(b),
        })
}

fn overall_statement(data: &SummaryData) -> String {
    if data.n_restaurants == 0 {
        return "no restaurants were scored".to_string();
    }
    match dominant_band(&data.bands) {
        Some(band) => format!(
            "most restaurants fall in the {} band",
            band.name.to_lowercase()
        ),
        None => "no band dominates".to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;

//! Local Business Health scorer.
//!
//! Pure functions only: the same [`SignalBundle`] always yields the same
//! [`ScoreResult`], bit for bit. Out-of-range ratings are clamped to the
//! rating scale and non-finite ratings are ignored, so every input scores.

pub mod lexicon;

use crate::model::scores::ScoreResult;
use crate::model::signals::SignalBundle;
use crate::model::weights::ScoringProfile;

pub use lexicon::text_sentiment_score;

pub fn score(signals: &SignalBundle) -> ScoreResult {
    score_with(signals, &ScoringProfile::default_v1())
}

pub fn score_with(signals: &SignalBundle, profile: &ScoringProfile) -> ScoreResult {
    let ratings = sanitize_ratings(&signals.ratings, profile);
    let rating_score = normalize_rating_avg(&ratings, profile);
    let text_score = text_sentiment_score(
        &signals.review_texts,
        profile.text_clamp,
        profile.neutral_score,
    );

    let sentiment = composite_sentiment(rating_score, text_score, profile);
    let consistency = operational_consistency(signals.hours_change_count, profile);
    let stability = talent_stability(signals.job_post_count, profile);
    let lbh = composite_lbh(sentiment, consistency, stability, profile);

    ScoreResult {
        lbh: round2(lbh),
        sentiment_score: round2(sentiment),
        consistency_score: round2(consistency),
        stability_score: round2(stability),
    }
}

fn sanitize_ratings(ratings: &[f64], profile: &ScoringProfile) -> Vec<f64> {
    if !rating_span_is_valid(profile) {
        return Vec::new();
    }
    ratings
        .iter()
        .copied()
        .filter(|r| r.is_finite())
        .map(|r| r.clamp(profile.rating_min, profile.rating_max))
        .collect()
}

fn rating_span_is_valid(profile: &ScoringProfile) -> bool {
    profile.rating_min.is_finite()
        && profile.rating_max.is_finite()
        && profile.rating_max > profile.rating_min
}

/// Mean rating rescaled from the rating scale onto [0, 100]; neutral when
/// empty or when the profile's scale is empty.
pub fn normalize_rating_avg(ratings: &[f64], profile: &ScoringProfile) -> f64 {
    if ratings.is_empty() || !rating_span_is_valid(profile) {
        return profile.neutral_score;
    }
    let avg = ratings.iter().sum::<f64>() / ratings.len() as f64;
    ((avg - profile.rating_min) / (profile.rating_max - profile.rating_min)) * 100.0
}

pub fn composite_sentiment(rating_score: f64, text_score: f64, profile: &ScoringProfile) -> f64 {
    rating_score * profile.rating_weight + text_score * profile.text_weight
}

/// Hard linear penalty: every hours change costs 100 / divisor points.
pub fn operational_consistency(hours_change_count: u32, profile: &ScoringProfile) -> f64 {
    linear_floor(hours_change_count, profile.hours_divisor)
}

pub fn talent_stability(job_post_count: u32, profile: &ScoringProfile) -> f64 {
    linear_floor(job_post_count, profile.jobs_divisor)
}

/// A non-positive divisor tolerates nothing: 100 with no events, else 0.
fn linear_floor(count: u32, divisor: f64) -> f64 {
    if divisor.is_nan() || divisor <= 0.0 {
        return if count == 0 { 100.0 } else { 0.0 };
    }
    (100.0 - (count as f64 / divisor) * 100.0).max(0.0)
}

pub fn composite_lbh(
    sentiment: f64,
    consistency: f64,
    stability: f64,
    profile: &ScoringProfile,
) -> f64 {
    sentiment * profile.sentiment_weight
        + consistency * profile.consistency_weight
        + stability * profile.stability_weight
}

/// Two decimals, ties away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "../../tests/src_inline/scoring/mod.rs"]
mod tests;

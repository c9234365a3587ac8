use chrono::{DateTime, Utc};

use crate::input::Dataset;
use crate::model::records::{Restaurant, ScoreRecord};
use crate::model::scores::ScoreResult;
use crate::model::weights::ScoringProfile;
use crate::pipeline::stage1_signals::gather_signals;
use crate::scoring::score_with;

#[derive(Debug, Clone)]
pub struct Stage2Inputs<'a> {
    pub dataset: &'a Dataset,
    pub restaurant_id: Option<&'a str>,
    pub scored_at: DateTime<Utc>,
    pub profile: &'a ScoringProfile,
}

#[derive(Debug, Clone)]
pub struct ScoredRestaurant<'a> {
    pub restaurant: &'a Restaurant,
    pub n_ratings: usize,
    pub n_texts: usize,
    pub hours_change_count: u32,
    pub job_post_count: u32,
    pub scores: ScoreResult,
    pub record: ScoreRecord,
}

#[derive(Debug)]
pub struct Stage2Output<'a> {
    pub rows: Vec<ScoredRestaurant<'a>>,
    pub clamped_ratings: usize,
    pub scored_at: DateTime<Utc>,
}

pub fn run_stage2<'a>(inputs: &Stage2Inputs<'a>) -> Stage2Output<'a> {
    let selected: Vec<&Restaurant> = match inputs.restaurant_id {
        Some(id) => inputs.dataset.restaurant(id).into_iter().collect(),
        None => inputs.dataset.restaurants.iter().collect(),
    };
    if let Some(id) = inputs.restaurant_id {
        if selected.is_empty() {
            tracing::warn!(
                restaurant_id = id,
                "restaurant not in dataset; nothing to rescore"
            );
        }
    }

    let mut rows = Vec::with_capacity(selected.len());
    let mut clamped_ratings = 0usize;
    for restaurant in selected {
        let signals = gather_signals(inputs.dataset, &restaurant.id);
        let clamped =
            signals.out_of_range_ratings(inputs.profile.rating_min, inputs.profile.rating_max);
        if clamped > 0 {
            tracing::warn!(
                restaurant_id = %restaurant.id,
                clamped,
                "ratings outside the rating scale were clamped or ignored"
            );
            clamped_ratings += clamped;
        }

        let scores = score_with(&signals, inputs.profile);
        tracing::debug!(
            restaurant_id = %restaurant.id,
            lbh = scores.lbh,
            sentiment = scores.sentiment_score,
            consistency = scores.consistency_score,
            stability = scores.stability_score,
            "scored"
        );

        rows.push(ScoredRestaurant {
            restaurant,
            n_ratings: signals.ratings.len(),
            n_texts: signals.review_texts.len(),
            hours_change_count: signals.hours_change_count,
            job_post_count: signals.job_post_count,
            scores,
            record: ScoreRecord::new(&restaurant.id, scores, inputs.scored_at),
        });
    }

    Stage2Output {
        rows,
        clamped_ratings,
        scored_at: inputs.scored_at,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_score.rs"]
mod tests;

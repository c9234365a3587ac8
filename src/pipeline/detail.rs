use std::cmp::Ordering;

use serde::Serialize;

use crate::error::{LbhError, LbhResult};
use crate::input::Dataset;
use crate::input::store::ScoreStore;
use crate::model::records::{RawReview, Restaurant, ScoreRecord};
use crate::model::scores::ScoreResult;
use crate::pipeline::stage1_signals::signals_from_reviews;
use crate::scoring::score;

pub const DETAIL_REVIEW_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DetailScore {
    Persisted(ScoreRecord),
    OnTheFly(ScoreResult),
}

impl DetailScore {
    pub fn scores(&self) -> ScoreResult {
        match self {
            DetailScore::Persisted(record) => record.scores(),
            DetailScore::OnTheFly(scores) => *scores,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantDetail<'a> {
    pub restaurant: &'a Restaurant,
    pub reviews: Vec<&'a RawReview>,
    pub lbh: DetailScore,
}

/// One restaurant with its latest reviews and LBH. Without a persisted score,
/// the score is computed from the returned reviews with zero hours and job counts.
pub fn restaurant_detail<'a>(
    dataset: &'a Dataset,
    store: &ScoreStore,
    restaurant_id: &str,
) -> LbhResult<RestaurantDetail<'a>> {
    let restaurant = dataset
        .restaurant(restaurant_id)
        .ok_or_else(|| LbhError::NotFound(restaurant_id.to_string()))?;

    let mut reviews: Vec<&RawReview> = dataset.reviews_for(&restaurant.id).collect();
    reviews.sort_by(|a, b| newest_first(a, b));
    reviews.truncate(DETAIL_REVIEW_LIMIT);

    let lbh = match store.get(&restaurant.id) {
        Some(record) => DetailScore::Persisted(record.clone()),
        None => {
            tracing::debug!(restaurant_id, "no persisted score; scoring on the fly");
            DetailScore::OnTheFly(score(&signals_from_reviews(reviews.iter().copied())))
        }
    };

    Ok(RestaurantDetail {
        restaurant,
        reviews,
        lbh,
    })
}

/// Descending by `created_at`, undated reviews first as in a SQL
/// `ORDER BY created_at DESC`.
fn newest_first(a: &RawReview, b: &RawReview) -> Ordering {
    match (&a.created_at, &b.created_at) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/detail.rs"]
mod tests;

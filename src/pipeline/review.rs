use chrono::{DateTime, Utc};

use crate::error::{LbhError, LbhResult};
use crate::input::Dataset;
use crate::model::records::RawReview;

/// A review submitted against the local dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub restaurant_id: String,
    pub rating: f64,
    pub text: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Appends a `raw_reviews` row for a known restaurant and returns it.
///
/// The rating must be a finite number. Values outside the rating scale are
/// stored as given; the scorer clamps them when the restaurant is rescored.
pub fn add_review(dataset: &mut Dataset, review: NewReview) -> LbhResult<&RawReview> {
    if review.restaurant_id.trim().is_empty() {
        return Err(LbhError::InvalidArgument(
            "restaurant id must not be empty".to_string(),
        ));
    }
    if !review.rating.is_finite() {
        return Err(LbhError::InvalidArgument(format!(
            "rating must be a finite number, got {}",
            review.rating
        )));
    }
    if dataset.restaurant(&review.restaurant_id).is_none() {
        return Err(LbhError::NotFound(review.restaurant_id));
    }

    tracing::debug!(
        restaurant_id = %review.restaurant_id,
        rating = review.rating,
        "appending review"
    );
    let idx = dataset.raw_reviews.len();
    dataset.raw_reviews.push(RawReview {
        restaurant_id: review.restaurant_id,
        author: None,
        rating: Some(review.rating),
        text: review.text,
        created_at: Some(review.created_at),
    });
    Ok(&dataset.raw_reviews[idx])
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/review.rs"]
mod tests;

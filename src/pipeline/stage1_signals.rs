use crate::input::Dataset;
use crate::model::records::RawReview;
use crate::model::signals::SignalBundle;

/// Builds the signal bundle for one restaurant from the raw dataset rows.
pub fn gather_signals(dataset: &Dataset, restaurant_id: &str) -> SignalBundle {
    let mut bundle = signals_from_reviews(dataset.reviews_for(restaurant_id));
    bundle.hours_change_count = count_rows(
        dataset
            .hours_changes
            .iter()
            .filter(|e| e.restaurant_id == restaurant_id)
            .count(),
    );
    bundle.job_post_count = count_rows(
        dataset
            .job_posts
            .iter()
            .filter(|e| e.restaurant_id == restaurant_id)
            .count(),
    );
    bundle
}

/// Ratings and texts from reviews, skipping absent, zero and empty values.
/// Counts are left at zero.
pub fn signals_from_reviews<'a, I>(reviews: I) -> SignalBundle
where
    I: IntoIterator<Item = &'a RawReview>,
{
    let mut bundle = SignalBundle::default();
    for review in reviews {
        if let Some(rating) = review.rating.filter(|r| *r != 0.0 && !r.is_nan()) {
            bundle.ratings.push(rating);
        }
        if let Some(text) = review.text.as_deref().filter(|t| !t.is_empty()) {
            bundle.review_texts.push(text.to_string());
        }
    }
    bundle
}

fn count_rows(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_signals.rs"]
mod tests;

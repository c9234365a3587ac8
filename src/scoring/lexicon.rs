//! Bag-of-words review sentiment.
//!
//! Each vocabulary word counts at most once per review, whether it appears as
//! a whole word or inside a longer one ("fast" matches "breakfast").

pub const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "delicious",
    "friendly",
    "fast",
];

pub const NEGATIVE_WORDS: &[&str] = &["bad", "terrible", "slow", "rude", "awful", "cold", "stale"];

/// Net keyword score of one review before clamping.
pub fn local_text_score(text: &str) -> i32 {
    let lower = text.to_lowercase();
    let positive = POSITIVE_WORDS.iter().filter(|w| lower.contains(*w)).count() as i32;
    let negative = NEGATIVE_WORDS.iter().filter(|w| lower.contains(*w)).count() as i32;
    positive - negative
}

/// Maps review texts onto [0, 100]; `neutral` when there are none or when
/// `clamp` leaves no range to map from.
pub fn text_sentiment_score<S: AsRef<str>>(texts: &[S], clamp: i32, neutral: f64) -> f64 {
    if texts.is_empty() || clamp <= 0 {
        return neutral;
    }
    let total: i32 = texts
        .iter()
        .map(|t| local_text_score(t.as_ref()).clamp(-clamp, clamp))
        .sum();
    let avg = total as f64 / texts.len() as f64;
    let span = clamp as f64;
    (((avg + span) / (2.0 * span)) * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
#[path = "../../tests/src_inline/scoring/lexicon.rs"]
mod tests;

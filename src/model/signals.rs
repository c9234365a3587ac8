use serde::{Deserialize, Deserializer, Serialize};

/// Raw signals for one business, consumed by a single scoring call.
///
/// Every field defaults to empty/zero, so a partially filled JSON object is a
/// valid bundle. Both snake_case and camelCase keys are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalBundle {
    #[serde(deserialize_with = "null_as_empty")]
    pub ratings: Vec<f64>,
    #[serde(alias = "reviewTexts", deserialize_with = "null_as_empty")]
    pub review_texts: Vec<String>,
    #[serde(alias = "hoursChangeCount", deserialize_with = "lenient_count")]
    pub hours_change_count: u32,
    #[serde(alias = "jobPostCount", deserialize_with = "lenient_count")]
    pub job_post_count: u32,
}

impl SignalBundle {
    pub fn new(
        ratings: Vec<f64>,
        review_texts: Vec<String>,
        hours_change_count: u32,
        job_post_count: u32,
    ) -> Self {
        Self {
            ratings,
            review_texts,
            hours_change_count,
            job_post_count,
        }
    }

    /// Ratings the scorer will clamp or ignore.
    pub fn out_of_range_ratings(&self, min: f64, max: f64) -> usize {
        self.ratings
            .iter()
            .filter(|r| !r.is_finite() || **r < min || **r > max)
            .count()
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(clamp_count(raw.unwrap_or(0.0)))
}

pub fn clamp_count(raw: f64) -> u32 {
    if !raw.is_finite() || raw <= 0.0 {
        0
    } else if raw >= u32::MAX as f64 {
        u32::MAX
    } else {
        raw.floor() as u32
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/signals.rs"]
mod tests;

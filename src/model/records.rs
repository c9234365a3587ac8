use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::scores::ScoreResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl Restaurant {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Restaurant")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReview {
    pub restaurant_id: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One observed event (hours change or job posting) attributed to a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    #[serde(default)]
    pub id: Option<String>,
    pub restaurant_id: String,
}

/// Persisted score row, keyed by restaurant id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub restaurant_id: String,
    pub lbh: f64,
    pub sentiment_score: f64,
    pub consistency_score: f64,
    pub stability_score: f64,
    pub last_scored_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn new(restaurant_id: &str, scores: ScoreResult, scored_at: DateTime<Utc>) -> Self {
        Self {
            restaurant_id: restaurant_id.to_string(),
            lbh: scores.lbh,
            sentiment_score: scores.sentiment_score,
            consistency_score: scores.consistency_score,
            stability_score: scores.stability_score,
            last_scored_at: scored_at,
        }
    }

    pub fn scores(&self) -> ScoreResult {
        ScoreResult {
            lbh: self.lbh,
            sentiment_score: self.sentiment_score,
            consistency_score: self.consistency_score,
            stability_score: self.stability_score,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::model::bands::{Grade, HealthBand};

/// Output of one scoring call. All fields are in [0, 100] with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub lbh: f64,
    pub sentiment_score: f64,
    pub consistency_score: f64,
    pub stability_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreFactor {
    pub name: &'static str,
    pub score: f64,
    pub weight: f64,
}

impl ScoreResult {
    pub fn overall(&self) -> u32 {
        self.lbh.round() as u32
    }

    pub fn band(&self) -> HealthBand {
        HealthBand::from_lbh(self.lbh)
    }

    pub fn grade(&self) -> Grade {
        Grade::from_lbh(self.lbh)
    }

    pub fn factors(&self) -> [ScoreFactor; 3] {
        [
            ScoreFactor {
                name: "Customer Sentiment",
                score: self.sentiment_score,
                weight: 0.5,
            },
            ScoreFactor {
                name: "Operational Consistency",
                score: self.consistency_score,
                weight: 0.25,
            },
            ScoreFactor {
                name: "Talent Stability",
                score: self.stability_score,
                weight: 0.25,
            },
        ]
    }
}

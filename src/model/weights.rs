#[derive(Debug, Clone, PartialEq)]
pub struct ScoringProfile {
    pub neutral_score: f64,
    pub rating_min: f64,
    pub rating_max: f64,
    pub rating_weight: f64,
    pub text_weight: f64,
    pub text_clamp: i32,
    pub hours_divisor: f64,
    pub jobs_divisor: f64,
    pub sentiment_weight: f64,
    pub consistency_weight: f64,
    pub stability_weight: f64,
}

impl ScoringProfile {
    pub fn default_v1() -> Self {
        Self {
            neutral_score: 50.0,
            rating_min: 1.0,
            rating_max: 5.0,
            rating_weight: 0.7,
            text_weight: 0.3,
            text_clamp: 3,
            hours_divisor: 10.0,
            jobs_divisor: 20.0,
            sentiment_weight: 0.5,
            consistency_weight: 0.25,
            stability_weight: 0.25,
        }
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}

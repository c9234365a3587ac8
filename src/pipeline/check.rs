use serde::Serialize;

use crate::model::scores::ScoreResult;
use crate::model::signals::SignalBundle;
use crate::scoring::score;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Field {
    Lbh,
    Sentiment,
    Consistency,
    Stability,
    /// `lbh` against the weighted sum of the rounded components.
    WeightedLbh,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Expect {
    Near { value: f64, tolerance: f64 },
    AtMost(f64),
}

impl Expect {
    fn holds(&self, actual: f64) -> bool {
        match *self {
            Expect::Near { value, tolerance } => (actual - value).abs() <= tolerance,
            Expect::AtMost(limit) => actual <= limit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub signals: SignalBundle,
    pub expectations: Vec<(Field, Expect)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub scenario: &'static str,
    pub field: Field,
    pub expected: Expect,
    pub actual: f64,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub outcomes: Vec<Outcome>,
}

impl CheckReport {
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }

    pub fn passed(&self) -> bool {
        self.failed() == 0
    }
}

const GOLDEN_TOL: f64 = 0.01;

fn near(value: f64, tolerance: f64) -> Expect {
    Expect::Near { value, tolerance }
}

fn golden(lbh: f64, sentiment: f64, consistency: f64, stability: f64) -> Vec<(Field, Expect)> {
    vec![
        (Field::Lbh, near(lbh, GOLDEN_TOL)),
        (Field::Sentiment, near(sentiment, GOLDEN_TOL)),
        (Field::Consistency, near(consistency, GOLDEN_TOL)),
        (Field::Stability, near(stability, GOLDEN_TOL)),
    ]
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "mixed_reviews_sample",
            signals: SignalBundle::new(
                vec![5.0, 4.0, 4.0, 3.0, 5.0],
                texts(&["Great food", "Slow service"]),
                1,
                2,
            ),
            expectations: vec![
                (Field::Sentiment, near(80.0, 30.0)),
                (Field::WeightedLbh, near(0.0, 0.5)),
            ],
        },
        Scenario {
            name: "high_churn_is_low",
            signals: SignalBundle::new(Vec::new(), Vec::new(), 10, 20),
            expectations: vec![(Field::Lbh, Expect::AtMost(60.0))],
        },
        Scenario {
            name: "golden_mixed",
            signals: SignalBundle::new(
                vec![5.0, 4.0, 4.0, 3.0, 5.0],
                texts(&["Great food", "Slow service"]),
                1,
                2,
            ),
            expectations: golden(80.5, 71.0, 90.0, 90.0),
        },
        Scenario {
            name: "golden_all_five_stars",
            signals: SignalBundle::new(vec![5.0; 5], Vec::new(), 0, 0),
            expectations: golden(92.5, 85.0, 100.0, 100.0),
        },
        Scenario {
            name: "golden_all_one_star",
            signals: SignalBundle::new(vec![1.0; 5], Vec::new(), 0, 0),
            expectations: vec![(Field::Sentiment, near(15.0, GOLDEN_TOL))],
        },
        Scenario {
            name: "golden_high_churn",
            signals: SignalBundle::new(Vec::new(), Vec::new(), 10, 20),
            expectations: golden(25.0, 50.0, 0.0, 0.0),
        },
        Scenario {
            name: "half_penalties",
            signals: SignalBundle::new(Vec::new(), Vec::new(), 5, 10),
            expectations: vec![
                (Field::Consistency, near(50.0, GOLDEN_TOL)),
                (Field::Stability, near(50.0, GOLDEN_TOL)),
            ],
        },
    ]
}

fn field_value(field: Field, scores: &ScoreResult) -> f64 {
    match field {
        Field::Lbh => scores.lbh,
        Field::Sentiment => scores.sentiment_score,
        Field::Consistency => scores.consistency_score,
        Field::Stability => scores.stability_score,
        Field::WeightedLbh => {
            scores.lbh
                - (scores.sentiment_score * 0.5
                    + scores.consistency_score * 0.25
                    + scores.stability_score * 0.25)
        }
    }
}

pub fn run_check(scenarios: &[Scenario]) -> CheckReport {
    let mut outcomes = Vec::new();
    for scenario in scenarios {
        let scores = score(&scenario.signals);
        tracing::debug!(scenario = scenario.name, ?scores, "scenario scored");
        for (field, expected) in &scenario.expectations {
            let actual = field_value(*field, &scores);
            let passed = expected.holds(actual);
            if !passed {
                tracing::warn!(
                    scenario = scenario.name,
                    ?field,
                    ?expected,
                    actual,
                    "scenario out of tolerance"
                );
            }
            outcomes.push(Outcome {
                scenario: scenario.name,
                field: *field,
                expected: *expected,
                actual,
                passed,
            });
        }
    }
    CheckReport { outcomes }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/check.rs"]
mod tests;

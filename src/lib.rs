//! Local Business Health (LBH) scoring.
//!
//! [`score`] turns a [`SignalBundle`] of ratings, review texts, hours-change
//! and job-post counts into a [`ScoreResult`]: three 0-100 sub-scores and
//! their weighted composite. The rest of the crate runs that scorer over a
//! restaurant dataset and persists and reports the results.

pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod scoring;

pub use error::{LbhError, LbhResult};
pub use model::scores::ScoreResult;
pub use model::signals::SignalBundle;
pub use model::weights::ScoringProfile;
pub use scoring::{score, score_with};

use crate::model::PerformanceInstance;
use serde::Serialize;

/// Additive breakdown of one instance's score, for reports.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreDetails {
    pub category_bonus: f64,
    pub venue_bonus: f64,
    pub duration_bonus: f64,
    pub end_time_bonus: f64,

    // Rounded to one decimal, the value the scheduler sees
    pub total: f64,
}

/// An instance paired with its score under the current run's preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredInstance {
    pub instance: PerformanceInstance,
    pub score: f64,
}

impl ScoredInstance {
    pub fn new(instance: PerformanceInstance, score: f64) -> Self {
        Self { instance, score }
    }
}

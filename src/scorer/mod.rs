pub mod types;

pub use self::types::{ScoreDetails, ScoredInstance};
use crate::config::ScoringWeights;
use crate::model::{PerformanceInstance, Preferences};

/// Scores instances against one preference set.
///
/// Scores are only comparable within a single run: they depend on the
/// preferences the scorer was built with.
#[derive(Debug, Clone)]
pub struct Scorer<'p> {
    pub weights: ScoringWeights,
    pub prefs: &'p Preferences,
}

impl<'p> Scorer<'p> {
    pub fn new(weights: ScoringWeights, prefs: &'p Preferences) -> Self {
        Self { weights, prefs }
    }

    /// Score used by dedup and the scheduler.
    pub fn score(&self, inst: &PerformanceInstance) -> f64 {
        self.score_debug(inst).total
    }

    pub fn score_debug(&self, inst: &PerformanceInstance) -> ScoreDetails {
        let w = &self.weights;

        let category_bonus = if self.prefs.preferred_categories.contains(&inst.category) {
            w.bonus_category
        } else {
            0.0
        };

        let venue_bonus = if !self.prefs.venue_preferences.is_empty()
            && self.prefs.venue_preferences.contains(&inst.venue)
        {
            w.bonus_venue
        } else {
            0.0
        };

        let short_by = w.duration_pivot.saturating_sub(inst.duration());
        let duration_bonus = short_by as f64 * w.duration_bonus_per_min;

        let end_time_bonus = (w.end_of_day - inst.end_minutes() as f64) / w.end_time_divisor;

        let raw = category_bonus + venue_bonus + duration_bonus + end_time_bonus;

        ScoreDetails {
            category_bonus,
            venue_bonus,
            duration_bonus,
            end_time_bonus,
            total: round_tenth(raw),
        }
    }

    pub fn score_all(&self, instances: &[PerformanceInstance]) -> Vec<ScoredInstance> {
        instances
            .iter()
            .map(|inst| ScoredInstance::new(inst.clone(), self.score(inst)))
            .collect()
    }
}

/// Rounds half-up to one decimal place.
pub fn round_tenth(x: f64) -> f64 {
    (x * 10.0 + 0.5).floor() / 10.0
}

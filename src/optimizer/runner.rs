use crate::config::{Config, ScoringWeights};
use crate::conflict::SlotGrid;
use crate::error::PlannerError;
use crate::model::{PerformanceInstance, Preferences};
use crate::optimizer::alternatives::{self, Alternative};
use crate::optimizer::dedup::dedupe_by_event;
use crate::optimizer::{Scheduler, Selection};
use crate::scorer::{ScoredInstance, Scorer};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct PlannerOptions {
    pub grid: SlotGrid,
    pub weights: ScoringWeights,
    pub alt_overlap_threshold: f64,
    pub max_alternatives: usize,
    pub perturb_amplitude: f64,
    pub perturb_seed: u64,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            grid: SlotGrid::default(),
            weights: ScoringWeights::default(),
            alt_overlap_threshold: 0.85,
            max_alternatives: 2,
            perturb_amplitude: 0.1,
            perturb_seed: 42,
        }
    }
}

impl TryFrom<&Config> for PlannerOptions {
    type Error = PlannerError;

    fn try_from(cfg: &Config) -> Result<Self, Self::Error> {
        cfg.validate()?;
        Ok(Self {
            grid: SlotGrid::from_params(&cfg.planner)?,
            weights: cfg.weights.clone(),
            alt_overlap_threshold: cfg.planner.alt_overlap_threshold,
            max_alternatives: cfg.planner.max_alternatives,
            perturb_amplitude: cfg.planner.perturb_amplitude,
            perturb_seed: cfg.planner.perturb_seed,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlanOutcome {
    /// Instances left after the date filter, before dedup.
    pub candidates: usize,
    pub optimized: Selection,
    pub alternatives: Vec<Alternative>,
}

/// Date filter -> dedup -> scheduler, plus optional alternatives.
///
/// Pure and synchronous; every call recomputes from its inputs.
pub struct Planner {
    options: PlannerOptions,
}

impl Planner {
    pub fn new(options: PlannerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    pub fn scorer<'p>(&self, prefs: &'p Preferences) -> Scorer<'p> {
        Scorer::new(self.options.weights.clone(), prefs)
    }

    pub fn filter_available(
        instances: &[PerformanceInstance],
        prefs: &Preferences,
    ) -> Vec<PerformanceInstance> {
        instances
            .iter()
            .filter(|i| prefs.is_date_available(&i.date))
            .cloned()
            .collect()
    }

    /// Scores `pool` under `prefs`, dedups and schedules.
    pub fn solve(&self, pool: &[PerformanceInstance], prefs: &Preferences) -> Selection {
        let scored = self.scorer(prefs).score_all(pool);
        self.solve_scored(scored, prefs.allow_venue_switches)
    }

    pub fn solve_scored(&self, scored: Vec<ScoredInstance>, allow_venue_switches: bool) -> Selection {
        let before = scored.len();
        let deduped = dedupe_by_event(scored);
        debug!("dedup: {} instances -> {} events", before, deduped.len());

        Scheduler::new(self.options.grid.clone(), allow_venue_switches).run(deduped)
    }

    pub fn optimize(
        &self,
        instances: &[PerformanceInstance],
        prefs: &Preferences,
        generate_alternatives: bool,
    ) -> PlanOutcome {
        let pool = Self::filter_available(instances, prefs);
        info!(
            "planner: {} of {} instances fall on available dates",
            pool.len(),
            instances.len()
        );

        let optimized = self.solve(&pool, prefs);
        info!(
            "planner: selected {} performances (score {:.1})",
            optimized.schedule.len(),
            optimized.total_score
        );

        let alternatives = if generate_alternatives {
            alternatives::generate(self, &pool, prefs, &optimized.schedule)
        } else {
            Vec::new()
        };

        PlanOutcome {
            candidates: pool.len(),
            optimized,
            alternatives,
        }
    }
}

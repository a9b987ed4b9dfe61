pub mod alternatives;
pub mod dedup;
pub mod perturbation;
pub mod runner;

use crate::conflict::SlotGrid;
use crate::model::{PerformanceInstance, Schedule};
use crate::scorer::ScoredInstance;
use tracing::debug;

/// Intermediate DP state, kept for inspection and tests.
#[derive(Debug, Clone, Default)]
pub struct DpTrace {
    /// Candidates in the order the DP visited them.
    pub order: Vec<ScoredInstance>,
    pub predecessor: Vec<Option<usize>>,
    /// `best[j]` is the best value using `order[0..=j]`.
    pub best: Vec<f64>,
    pub take: Vec<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub schedule: Schedule,
    pub total_score: f64,
    pub trace: DpTrace,
}

impl Selection {
    /// Score the scheduler used for `id`, which may differ from the primary
    /// scorer's (perturbed or single-venue runs).
    pub fn score_of(&self, id: &str) -> Option<f64> {
        self.trace
            .order
            .iter()
            .find(|c| c.instance.id == id)
            .map(|c| c.score)
    }
}

/// Weighted interval scheduling over a pairwise compatibility rule.
///
/// The predecessor of `j` is the nearest index `i < j` compatible with `j`
/// (backward scan), not the textbook latest non-overlapping interval.
/// Because slot and venue rules are not transitive, the walk back through
/// the table re-checks every taken candidate against what is already
/// selected and steps over it when it would clash. This is an
/// approximation, not an optimality proof.
pub struct Scheduler {
    grid: SlotGrid,
    allow_venue_switches: bool,
}

impl Scheduler {
    pub fn new(grid: SlotGrid, allow_venue_switches: bool) -> Self {
        Self {
            grid,
            allow_venue_switches,
        }
    }

    pub fn run(&self, mut candidates: Vec<ScoredInstance>) -> Selection {
        if candidates.is_empty() {
            debug!("scheduler: no candidates");
            return Selection::default();
        }

        // Stable: equal keys keep input order
        candidates.sort_by_key(|c| (c.instance.end_minutes(), c.instance.start_minutes()));

        let n = candidates.len();
        let predecessor: Vec<Option<usize>> = (0..n)
            .map(|j| {
                (0..j).rev().find(|&i| {
                    self.compatible(&candidates[i].instance, &candidates[j].instance)
                })
            })
            .collect();

        let mut best = vec![0.0f64; n];
        let mut take = vec![false; n];
        for j in 0..n {
            let include = candidates[j].score + predecessor[j].map_or(0.0, |p| best[p]);
            let exclude = if j > 0 { best[j - 1] } else { 0.0 };
            if include > exclude {
                best[j] = include;
                take[j] = true;
            } else {
                best[j] = exclude;
            }
        }

        let picked = self.reconstruct(&candidates, &predecessor, &take);
        let total_score = picked.iter().map(|&i| candidates[i].score).sum();
        let items = picked
            .iter()
            .map(|&i| candidates[i].instance.clone())
            .collect();

        debug!(
            "scheduler: {} candidates -> {} selected (table best {:.1})",
            n,
            picked.len(),
            best[n - 1]
        );

        Selection {
            schedule: Schedule::new(items),
            total_score,
            trace: DpTrace {
                order: candidates,
                predecessor,
                best,
                take,
            },
        }
    }

    fn compatible(&self, a: &PerformanceInstance, b: &PerformanceInstance) -> bool {
        self.grid.can_attend_both(a, b, self.allow_venue_switches)
    }

    /// Walks the table backwards from the last index; returns indices in
    /// visiting order reversed (chronological by the DP's sort).
    fn reconstruct(
        &self,
        candidates: &[ScoredInstance],
        predecessor: &[Option<usize>],
        take: &[bool],
    ) -> Vec<usize> {
        let mut picked: Vec<usize> = Vec::new();
        let mut cursor = candidates.len().checked_sub(1);

        while let Some(j) = cursor {
            let fits = picked
                .iter()
                .all(|&k| self.compatible(&candidates[j].instance, &candidates[k].instance));

            if take[j] && fits {
                picked.push(j);
                cursor = predecessor[j];
            } else {
                if take[j] {
                    debug!(
                        "scheduler: stepping over '{}' ({} {}), clashes with a later pick",
                        candidates[j].instance.title,
                        candidates[j].instance.date,
                        candidates[j].instance.start_time
                    );
                }
                cursor = j.checked_sub(1);
            }
        }

        picked.reverse();
        picked
    }
}

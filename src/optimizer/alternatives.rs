use crate::model::{PerformanceInstance, Preferences, Schedule};
use crate::optimizer::perturbation::jitter_scores;
use crate::optimizer::runner::Planner;
use crate::optimizer::Selection;
use std::collections::{BTreeSet, HashMap};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::debug;

/// Ways of deriving a secondary schedule, in the order they are tried.
#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum Variant {
    /// Same pool, venue switching inverted.
    VenueSwitchFlip,
    /// Same pool, scores jittered with a seeded RNG before dedup.
    Perturbed,
    /// Only the busiest venue, no switching, that venue preferred.
    SingleVenue,
}

#[derive(Debug, Clone)]
pub struct Alternative {
    pub variant: Variant,
    pub selection: Selection,
}

impl Variant {
    fn attempt(
        self,
        planner: &Planner,
        pool: &[PerformanceInstance],
        prefs: &Preferences,
    ) -> Option<Selection> {
        match self {
            Self::VenueSwitchFlip => {
                let mut flipped = prefs.clone();
                flipped.allow_venue_switches = !prefs.allow_venue_switches;
                Some(planner.solve(pool, &flipped))
            }
            Self::Perturbed => {
                let opts = planner.options();
                let mut scored = planner.scorer(prefs).score_all(pool);
                let mut rng = fastrand::Rng::with_seed(opts.perturb_seed);
                jitter_scores(&mut scored, &mut rng, opts.perturb_amplitude);
                Some(planner.solve_scored(scored, prefs.allow_venue_switches))
            }
            Self::SingleVenue => {
                let venue = most_frequent_venue(pool)?.to_string();
                let focused: Vec<PerformanceInstance> =
                    pool.iter().filter(|i| i.venue == venue).cloned().collect();

                let mut single = prefs.clone();
                single.venue_preferences = BTreeSet::from([venue]);
                single.allow_venue_switches = false;
                Some(planner.solve(&focused, &single))
            }
        }
    }
}

/// Venue with the most instances; ties go to the one seen first.
pub fn most_frequent_venue(pool: &[PerformanceInstance]) -> Option<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for inst in pool {
        let c = counts.entry(inst.venue.as_str()).or_insert(0);
        if *c == 0 {
            order.push(inst.venue.as_str());
        }
        *c += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for venue in order {
        let c = counts[venue];
        if best.map_or(true, |(_, b)| c > b) {
            best = Some((venue, c));
        }
    }
    best.map(|(v, _)| v)
}

/// Up to `max_alternatives` schedules that are non-empty and share less
/// than the configured fraction of instances with `primary`.
pub fn generate(
    planner: &Planner,
    pool: &[PerformanceInstance],
    prefs: &Preferences,
    primary: &Schedule,
) -> Vec<Alternative> {
    let opts = planner.options();
    let mut accepted = Vec::new();

    for variant in Variant::iter() {
        if accepted.len() >= opts.max_alternatives {
            break;
        }

        let Some(selection) = variant.attempt(planner, pool, prefs) else {
            debug!("alternatives: {} skipped (empty pool)", variant);
            continue;
        };

        if selection.schedule.is_empty() {
            debug!("alternatives: {} rejected (empty schedule)", variant);
            continue;
        }

        let overlap = selection.schedule.overlap_fraction(primary);
        if overlap >= opts.alt_overlap_threshold {
            debug!(
                "alternatives: {} rejected (overlap {:.2} >= {:.2})",
                variant, overlap, opts.alt_overlap_threshold
            );
            continue;
        }

        debug!("alternatives: {} accepted (overlap {:.2})", variant, overlap);
        accepted.push(Alternative { variant, selection });
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::instance;

    #[test]
    fn busiest_venue_tie_goes_to_first_seen() {
        let pool = vec![
            instance("a", "e1", "d1", "19:15", "20:30", "Y", "Music"),
            instance("b", "e2", "d1", "19:15", "20:30", "X", "Music"),
            instance("c", "e3", "d2", "19:15", "20:30", "X", "Music"),
            instance("d", "e4", "d2", "19:15", "20:30", "Y", "Music"),
        ];
        assert_eq!(most_frequent_venue(&pool), Some("Y"));
        assert_eq!(most_frequent_venue(&[]), None);
    }

    #[test]
    fn variants_are_tried_in_fixed_order() {
        let order: Vec<String> = Variant::iter().map(|v| v.to_string()).collect();
        assert_eq!(order, vec!["venue_switch_flip", "perturbed", "single_venue"]);
    }
}

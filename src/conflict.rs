//! Time and conflict rules shared by the scheduler and the combo finder.

use crate::config::PlannerParams;
use crate::error::PlanResult;
use crate::model::{ClockTime, PerformanceInstance};

/// Parses `HH:MM` into minutes since midnight.
pub fn time_to_minutes(time: &str) -> PlanResult<u16> {
    Ok(time.parse::<ClockTime>()?.minutes())
}

/// Same date and the half-open intervals `[start, end)` intersect.
pub fn overlaps(a: &PerformanceInstance, b: &PerformanceInstance) -> bool {
    a.date == b.date
        && a.start_minutes() < b.end_minutes()
        && b.start_minutes() < a.end_minutes()
}

/// The festival's canonical nightly slots.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGrid {
    starts: Vec<u16>,
    tolerance: u16,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            starts: vec![19 * 60 + 15, 21 * 60],
            tolerance: 30,
        }
    }
}

impl SlotGrid {
    pub fn new(starts: &[ClockTime], tolerance: u16) -> Self {
        Self {
            starts: starts.iter().map(|t| t.minutes()).collect(),
            tolerance,
        }
    }

    pub fn from_params(params: &PlannerParams) -> PlanResult<Self> {
        Ok(Self::new(&params.get_slot_times()?, params.slot_tolerance))
    }

    /// Nearest canonical slot by start time, or `None` when the nearest one
    /// is further than the tolerance. Equidistant slots resolve to the earlier.
    pub fn slot_index(&self, inst: &PerformanceInstance) -> Option<usize> {
        let start = inst.start_minutes();
        let mut best: Option<(usize, u16)> = None;
        for (idx, &slot) in self.starts.iter().enumerate() {
            let diff = start.abs_diff(slot);
            match best {
                Some((_, best_diff)) if diff >= best_diff => {}
                _ => best = Some((idx, diff)),
            }
        }
        best.filter(|&(_, diff)| diff <= self.tolerance)
            .map(|(idx, _)| idx)
    }

    /// Pairwise compatibility. Not transitive; see the scheduler for how
    /// that is tolerated.
    pub fn can_attend_both(
        &self,
        a: &PerformanceInstance,
        b: &PerformanceInstance,
        allow_venue_switches: bool,
    ) -> bool {
        if a.date != b.date {
            return true;
        }
        if overlaps(a, b) {
            return false;
        }

        if let (Some(sa), Some(sb)) = (self.slot_index(a), self.slot_index(b)) {
            if sa == sb {
                return false;
            }
        }

        if !allow_venue_switches && a.venue != b.venue {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::instance;

    #[test]
    fn overlap_is_half_open() {
        let a = instance("a", "e1", "2024-01-01", "19:00", "20:00", "X", "Music");
        let b = instance("b", "e2", "2024-01-01", "20:00", "21:00", "X", "Music");
        assert!(!overlaps(&a, &b));

        let c = instance("c", "e3", "2024-01-01", "19:59", "21:00", "X", "Music");
        assert!(overlaps(&a, &c));
        assert!(overlaps(&c, &a));
    }

    #[test]
    fn overlap_needs_same_date() {
        let a = instance("a", "e1", "2024-01-01", "19:00", "20:00", "X", "Music");
        let b = instance("b", "e2", "2024-01-02", "19:00", "20:00", "X", "Music");
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn slot_classification_uses_tolerance() {
        let grid = SlotGrid::default();
        let at = |start: &str| instance("x", "e", "2024-01-01", start, "23:00", "X", "Music");

        assert_eq!(grid.slot_index(&at("19:15")), Some(0));
        assert_eq!(grid.slot_index(&at("18:45")), Some(0));
        assert_eq!(grid.slot_index(&at("18:44")), None);
        assert_eq!(grid.slot_index(&at("20:30")), Some(1));
        assert_eq!(grid.slot_index(&at("21:30")), Some(1));
        assert_eq!(grid.slot_index(&at("21:31")), None);
        assert_eq!(grid.slot_index(&at("14:00")), None);
    }

    #[test]
    fn time_to_minutes_parses() {
        assert_eq!(time_to_minutes("00:00").unwrap(), 0);
        assert_eq!(time_to_minutes("21:00").unwrap(), 1260);
        assert!(time_to_minutes("9pm").is_err());
    }
}

//! Combo-day finder: same-day pairs reachable with a travel buffer.

use crate::model::PerformanceInstance;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Coarse venue clustering used for travel estimates.
#[derive(Debug, Clone)]
pub struct VenueClusters {
    clusters: HashMap<String, String>,
}

impl Default for VenueClusters {
    fn default() -> Self {
        let clusters = [
            ("Gujarat University", "university"),
            ("ATIRA", "cultural-mile"),
            ("Shreyas Foundation", "foundation"),
        ]
        .into_iter()
        .map(|(v, c)| (v.to_string(), c.to_string()))
        .collect();
        Self { clusters }
    }
}

impl VenueClusters {
    pub fn cluster_of<'a>(&'a self, venue: &str) -> &'a str {
        self.clusters.get(venue).map_or("other", String::as_str)
    }

    /// Minutes to get from one main venue to another.
    pub fn travel_minutes(&self, from: &str, to: &str) -> u16 {
        if from == to {
            return 5;
        }
        let a = self.cluster_of(from);
        let b = self.cluster_of(to);
        if a == b {
            return 12;
        }
        match (a, b) {
            ("university", "cultural-mile") | ("cultural-mile", "university") => 15,
            _ => 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComboRules {
    pub clusters: VenueClusters,
    pub assumed_duration: u16,
    pub decompression: u16,
}

impl Default for ComboRules {
    fn default() -> Self {
        Self {
            clusters: VenueClusters::default(),
            assumed_duration: 75,
            decompression: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Combo<'a> {
    pub first: &'a PerformanceInstance,
    pub second: &'a PerformanceInstance,
    pub travel_minutes: u16,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboDay<'a> {
    pub date: &'a str,
    pub date_obj: i64,
    pub combos: Vec<Combo<'a>>,
}

impl ComboRules {
    /// Orders the pair by start and checks the start gap covers the show,
    /// a breather and the walk between venues.
    pub fn pair<'a>(
        &self,
        a: &'a PerformanceInstance,
        b: &'a PerformanceInstance,
    ) -> Option<Combo<'a>> {
        let (first, second) = if b.start_minutes() < a.start_minutes() {
            (b, a)
        } else {
            (a, b)
        };
        let travel = self.clusters.travel_minutes(&first.venue, &second.venue);
        let gap = second.start_minutes() - first.start_minutes();

        (gap >= self.assumed_duration + self.decompression + travel).then_some(Combo {
            first,
            second,
            travel_minutes: travel,
        })
    }

    /// Every date with at least one attendable pair, earliest date first.
    pub fn find<'a>(&self, instances: &'a [PerformanceInstance]) -> Vec<ComboDay<'a>> {
        let mut by_date: BTreeMap<&str, Vec<&PerformanceInstance>> = BTreeMap::new();
        for inst in instances {
            by_date.entry(inst.date.as_str()).or_default().push(inst);
        }
        let days: Vec<(&str, Vec<&PerformanceInstance>)> = by_date.into_iter().collect();

        let mut out: Vec<ComboDay<'a>> = days
            .par_iter()
            .map(|&(date, ref perfs)| {
                let mut combos = Vec::new();
                for i in 0..perfs.len() {
                    for j in (i + 1)..perfs.len() {
                        if let Some(c) = self.pair(perfs[i], perfs[j]) {
                            combos.push(c);
                        }
                    }
                }
                ComboDay {
                    date,
                    date_obj: perfs[0].date_obj,
                    combos,
                }
            })
            .filter(|day| !day.combos.is_empty())
            .collect();

        out.sort_by(|a, b| (a.date_obj, a.date).cmp(&(b.date_obj, b.date)));
        out
    }
}

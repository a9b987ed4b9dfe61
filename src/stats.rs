use crate::model::PerformanceInstance;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_instances: usize,
    pub distinct_events: usize,
    pub distinct_artists: usize,
    pub categories: Vec<(String, usize)>,
    pub venues: Vec<(String, usize)>,
    /// Busiest five dates.
    pub top_dates: Vec<(String, usize)>,
}

/// Sorted by count descending, then name ascending.
fn ranked(counts: BTreeMap<&str, usize>) -> Vec<(String, usize)> {
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

pub fn catalog_stats(instances: &[PerformanceInstance]) -> CatalogStats {
    let mut categories = BTreeMap::new();
    let mut venues = BTreeMap::new();
    let mut dates = BTreeMap::new();
    let mut events = BTreeSet::new();
    let mut artists = BTreeSet::new();

    for inst in instances {
        *categories.entry(inst.category.as_str()).or_insert(0) += 1;
        *venues.entry(inst.venue.as_str()).or_insert(0) += 1;
        *dates.entry(inst.date.as_str()).or_insert(0) += 1;
        events.insert(inst.event_id.as_str());
        if !inst.artist.is_empty() {
            artists.insert(inst.artist.as_str());
        }
    }

    let mut top_dates = ranked(dates);
    top_dates.truncate(5);

    CatalogStats {
        total_instances: instances.len(),
        distinct_events: events.len(),
        distinct_artists: artists.len(),
        categories: ranked(categories),
        venues: ranked(venues),
        top_dates,
    }
}

//! Per-user selection state, passed around explicitly.

use crate::catalog::Catalog;
use crate::model::{PerformanceInstance, Schedule};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub date: Option<String>,
    pub category: Option<String>,
    pub venue: Option<String>,
    pub search: String,
}

/// A named selection handed to whatever persists plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    pub name: String,
    pub instance_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    selected: Vec<String>,
    pub filters: Filters,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Adds `id` if absent, removes it otherwise. Returns the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(id.to_string());
            true
        }
    }

    /// Replaces the selection with a schedule's instances.
    pub fn select_schedule(&mut self, schedule: &Schedule) {
        self.selected = schedule.iter().map(|i| i.id.clone()).collect();
    }

    pub fn set_date(&mut self, date: Option<String>) {
        self.filters.date = date;
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.filters.category = category;
    }

    pub fn set_venue(&mut self, venue: Option<String>) {
        self.filters.venue = venue;
    }

    pub fn set_search(&mut self, query: &str) {
        self.filters.search = query.to_string();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Catalog instances passing every active filter. Search matches title
    /// or artist, case-insensitively.
    pub fn apply_filters<'c>(&self, catalog: &'c Catalog) -> Vec<&'c PerformanceInstance> {
        let f = &self.filters;
        let needle = f.search.trim().to_lowercase();

        catalog
            .instances
            .iter()
            .filter(|i| f.date.as_ref().map_or(true, |d| &i.date == d))
            .filter(|i| f.category.as_ref().map_or(true, |c| &i.category == c))
            .filter(|i| f.venue.as_ref().map_or(true, |v| &i.venue == v))
            .filter(|i| {
                needle.is_empty()
                    || i.title.to_lowercase().contains(&needle)
                    || i.artist.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Selected instances that still exist in `catalog`, in selection order.
    pub fn selected_instances<'c>(&self, catalog: &'c Catalog) -> Vec<&'c PerformanceInstance> {
        self.selected.iter().filter_map(|id| catalog.get(id)).collect()
    }

    pub fn commit(&self, name: &str) -> PlanRecord {
        PlanRecord {
            name: name.to_string(),
            instance_ids: self.selected.clone(),
        }
    }
}

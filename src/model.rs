use crate::error::PlannerError;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Wall-clock time of day, stored as minutes since midnight.
///
/// Parsed from and rendered as `HH:MM` (24h). Parsing is the only place a
/// malformed time can surface; everything past ingestion works on minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MINUTES_PER_DAY: u16 = 1440;

    pub fn from_minutes(minutes: u16) -> Result<Self, PlannerError> {
        if minutes >= Self::MINUTES_PER_DAY {
            return Err(PlannerError::InvalidTime(format!("{} minutes", minutes)));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Adds `minutes`; `None` once the result would reach midnight.
    pub fn checked_add(self, minutes: u32) -> Option<Self> {
        let total = self.0 as u32 + minutes;
        (total < Self::MINUTES_PER_DAY as u32).then(|| Self(total as u16))
    }
}

impl FromStr for ClockTime {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || PlannerError::InvalidTime(s.to_string());

        // `%M` alone would take a single digit
        let (h, m) = raw.split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid());
        }

        let time = NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| invalid())?;
        Ok(Self((time.hour() * 60 + time.minute()) as u16))
    }
}

impl TryFrom<String> for ClockTime {
    type Error = PlannerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(t: ClockTime) -> Self {
        t.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// One concrete scheduled occurrence of an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceInstance {
    pub id: String,
    pub event_id: String,

    pub date: String,
    #[serde(default)]
    pub date_obj: i64,
    pub start_time: ClockTime,
    pub end_time: ClockTime,

    pub venue: String,
    #[serde(default)]
    pub specific_venue: String,

    pub title: String,
    #[serde(default)]
    pub artist: String,
    pub category: String,
    #[serde(default)]
    pub sub_category: String,

    #[serde(default, alias = "durationMin", skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl PerformanceInstance {
    pub fn start_minutes(&self) -> u16 {
        self.start_time.minutes()
    }

    pub fn end_minutes(&self) -> u16 {
        self.end_time.minutes()
    }

    /// Supplied duration, or `end - start` when the catalog omitted it.
    pub fn duration(&self) -> u32 {
        self.duration_minutes
            .unwrap_or_else(|| self.end_minutes().saturating_sub(self.start_minutes()) as u32)
    }
}

fn default_max_events_per_day() -> u32 {
    4
}

fn default_allow_venue_switches() -> bool {
    true
}

/// User preferences for one optimizer run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub preferred_categories: BTreeSet<String>,
    pub available_dates: BTreeSet<String>,
    #[serde(default = "default_max_events_per_day")]
    pub max_events_per_day: u32,
    #[serde(default)]
    pub venue_preferences: BTreeSet<String>,
    #[serde(default = "default_allow_venue_switches")]
    pub allow_venue_switches: bool,
}

impl Preferences {
    pub fn new<C, D>(categories: C, dates: D) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            preferred_categories: categories.into_iter().map(Into::into).collect(),
            available_dates: dates.into_iter().map(Into::into).collect(),
            max_events_per_day: default_max_events_per_day(),
            venue_preferences: BTreeSet::new(),
            allow_venue_switches: default_allow_venue_switches(),
        }
    }

    pub fn with_venues<V>(mut self, venues: V) -> Self
    where
        V: IntoIterator,
        V::Item: Into<String>,
    {
        self.venue_preferences = venues.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_venue_switches(mut self, allow: bool) -> Self {
        self.allow_venue_switches = allow;
        self
    }

    pub fn with_max_events_per_day(mut self, max: u32) -> Self {
        self.max_events_per_day = max;
        self
    }

    pub fn is_date_available(&self, date: &str) -> bool {
        self.available_dates.contains(date)
    }
}

/// Chronologically ordered, mutually compatible selection of instances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    pub items: Vec<PerformanceInstance>,
}

impl Schedule {
    pub fn new(items: Vec<PerformanceInstance>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PerformanceInstance> {
        self.items.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.id.as_str()).collect()
    }

    pub fn per_day_counts(&self) -> BTreeMap<&str, u32> {
        let mut counts = BTreeMap::new();
        for inst in &self.items {
            *counts.entry(inst.date.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Fraction of shared instance ids relative to the larger schedule.
    pub fn overlap_fraction(&self, other: &Schedule) -> f64 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }
        let theirs: BTreeSet<&str> = other.items.iter().map(|i| i.id.as_str()).collect();
        let shared = self
            .items
            .iter()
            .filter(|i| theirs.contains(i.id.as_str()))
            .count();
        shared as f64 / self.len().max(other.len()) as f64
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a PerformanceInstance;
    type IntoIter = std::slice::Iter<'a, PerformanceInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

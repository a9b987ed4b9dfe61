use crate::catalog::{validate_instances, Catalog};
use crate::error::{PlanResult, PlannerError};
use crate::model::{PerformanceInstance, Preferences, Schedule};
use crate::optimizer::runner::{PlanOutcome, Planner};
use crate::session::{PlanRecord, SessionState};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn};

/// Optimizer request. Optional fields take the documented defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[serde(default)]
    pub instances: Vec<PerformanceInstance>,
    pub preferred_categories: Vec<String>,
    pub available_dates: Vec<String>,
    #[serde(default)]
    pub max_events_per_day: Option<u32>,
    #[serde(default)]
    pub venue_preferences: Option<Vec<String>>,
    #[serde(default)]
    pub allow_venue_switches: Option<bool>,
    #[serde(default)]
    pub generate_alternatives: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub optimized_schedule: Schedule,
    pub alternatives: Vec<Schedule>,
    /// Dates where the optimized schedule exceeds `maxEventsPerDay`.
    /// The cap is advisory; nothing is removed.
    #[serde(default)]
    pub over_cap_dates: Vec<String>,
}

impl ScheduleRequest {
    pub fn preferences(&self) -> Preferences {
        Preferences::new(&self.preferred_categories, &self.available_dates)
            .with_venues(self.venue_preferences.iter().flatten())
            .with_venue_switches(self.allow_venue_switches.unwrap_or(true))
            .with_max_events_per_day(self.max_events_per_day.unwrap_or(4))
    }
}

/// Boundary validation. The optimizer itself assumes everything here holds.
pub fn validate_request(req: &ScheduleRequest) -> PlanResult<()> {
    validate_preferences(req)?;
    validate_instances(&req.instances)
}

fn validate_preferences(req: &ScheduleRequest) -> PlanResult<()> {
    if req.preferred_categories.iter().all(|c| c.trim().is_empty()) {
        return Err(PlannerError::Validation(
            "preferredCategories must name at least one category".to_string(),
        ));
    }
    if req.available_dates.iter().all(|d| d.trim().is_empty()) {
        return Err(PlannerError::Validation(
            "availableDates must name at least one date".to_string(),
        ));
    }
    if req.max_events_per_day == Some(0) {
        return Err(PlannerError::Validation(
            "maxEventsPerDay must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Validates, runs the planner and shapes the response. Nothing is saved.
pub fn generate_schedule_preview(
    planner: &Planner,
    req: &ScheduleRequest,
) -> PlanResult<ScheduleResponse> {
    validate_request(req)?;
    Ok(run_preview(planner, req, &req.instances))
}

fn run_preview(
    planner: &Planner,
    req: &ScheduleRequest,
    instances: &[PerformanceInstance],
) -> ScheduleResponse {
    let prefs = req.preferences();
    let outcome = planner.optimize(instances, &prefs, req.generate_alternatives.unwrap_or(false));
    into_response(outcome, &prefs)
}

pub fn into_response(outcome: PlanOutcome, prefs: &Preferences) -> ScheduleResponse {
    let over_cap_dates: Vec<String> = outcome
        .optimized
        .schedule
        .per_day_counts()
        .into_iter()
        .filter(|&(_, n)| n > prefs.max_events_per_day)
        .map(|(date, n)| {
            warn!(
                "{} has {} selections, above the advisory cap of {}",
                date, n, prefs.max_events_per_day
            );
            date.to_string()
        })
        .collect();

    ScheduleResponse {
        optimized_schedule: outcome.optimized.schedule,
        alternatives: outcome
            .alternatives
            .into_iter()
            .map(|a| a.selection.schedule)
            .collect(),
        over_cap_dates,
    }
}

/// Explicit per-session state for a long-lived caller (UI shell, server).
#[derive(Default)]
pub struct PlannerState {
    pub catalog: Mutex<Option<Catalog>>,
    pub session: Mutex<SessionState>,
}

fn poisoned<E: std::fmt::Display>(e: E) -> PlannerError {
    PlannerError::Config(format!("state lock poisoned: {}", e))
}

/// Service: load a catalog file into the state.
pub fn load_catalog<P: AsRef<Path>>(state: &PlannerState, path: P) -> PlanResult<usize> {
    let catalog = Catalog::open(path)?;
    let count = catalog.len();

    let mut guard = state.catalog.lock().map_err(poisoned)?;
    *guard = Some(catalog);
    info!("API: catalog loaded ({} instances)", count);
    Ok(count)
}

/// Service: preview against the loaded catalog. Instances in the request,
/// if any, are ignored. The catalog was validated when it was loaded.
pub fn preview_from_catalog(
    state: &PlannerState,
    planner: &Planner,
    req: &ScheduleRequest,
) -> PlanResult<ScheduleResponse> {
    validate_preferences(req)?;

    let instances = {
        let guard = state.catalog.lock().map_err(poisoned)?;
        guard
            .as_ref()
            .map(|catalog| catalog.instances.clone())
            .ok_or_else(|| {
                PlannerError::Config("Catalog not loaded. Load a catalog first.".to_string())
            })?
    };

    Ok(run_preview(planner, req, &instances))
}

/// Service: adopt a schedule as the session selection and hand back the
/// record for persistence.
pub fn commit_schedule(
    state: &PlannerState,
    name: &str,
    schedule: &Schedule,
) -> PlanResult<PlanRecord> {
    if name.trim().is_empty() {
        return Err(PlannerError::Validation("plan name must not be blank".to_string()));
    }
    let mut session = state.session.lock().map_err(poisoned)?;
    session.select_schedule(schedule);
    Ok(session.commit(name.trim()))
}

use crate::reports;
use clap::Args;
use festplan::api::{into_response, validate_request, ScheduleRequest};
use festplan::catalog::Catalog;
use festplan::config::Config;
use festplan::error::{PlanResult, PlannerError};
use festplan::optimizer::runner::{Planner, PlannerOptions};
use std::fs;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(long, value_delimiter = ',')]
    pub categories: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub dates: Vec<String>,

    #[arg(long, value_delimiter = ',')]
    pub venues: Vec<String>,

    #[arg(long, default_value_t = false)]
    pub no_venue_switches: bool,

    #[arg(long)]
    pub max_per_day: Option<u32>,

    /// Also derive up to `--max-alternatives` distinct schedules.
    #[arg(long, default_value_t = false)]
    pub alternatives: bool,

    /// JSON request file. Replaces the preference flags; an empty
    /// `instances` list falls back to the catalog.
    #[arg(long)]
    pub request: Option<String>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl PlanArgs {
    fn to_request(&self, config: &Config) -> ScheduleRequest {
        ScheduleRequest {
            instances: Vec::new(),
            preferred_categories: self.categories.clone(),
            available_dates: self.dates.clone(),
            max_events_per_day: Some(
                self.max_per_day
                    .unwrap_or(config.planner.default_max_per_day),
            ),
            venue_preferences: Some(self.venues.clone()),
            allow_venue_switches: Some(!self.no_venue_switches),
            generate_alternatives: Some(self.alternatives),
        }
    }
}

fn read_request(path: &str) -> PlanResult<ScheduleRequest> {
    let content = fs::read_to_string(path).map_err(|e| {
        PlannerError::Config(format!("Failed to read request file '{}': {}", path, e))
    })?;
    Ok(serde_json::from_str(&content)?)
}

pub fn run(args: &PlanArgs, config: &Config, catalog_path: &str) -> PlanResult<()> {
    let mut req = match &args.request {
        Some(path) => {
            info!("📄 Loading request: {}", path);
            read_request(path)?
        }
        None => args.to_request(config),
    };
    req.max_events_per_day
        .get_or_insert(config.planner.default_max_per_day);
    if req.instances.is_empty() {
        req.instances = Catalog::open(catalog_path)?.instances;
    }

    validate_request(&req)?;
    let planner = Planner::new(PlannerOptions::try_from(config)?);
    let prefs = req.preferences();
    let outcome = planner.optimize(
        &req.instances,
        &prefs,
        req.generate_alternatives.unwrap_or(false),
    );

    if args.json {
        let resp = into_response(outcome, &prefs);
        println!("{}", serde_json::to_string_pretty(&resp)?);
        return Ok(());
    }

    reports::print_selection("Optimized schedule", &outcome.optimized);
    for (i, alt) in outcome.alternatives.iter().enumerate() {
        reports::print_selection(&format!("Alternative #{} ({})", i + 1, alt.variant), &alt.selection);
    }
    let resp = into_response(outcome, &prefs);
    reports::print_over_cap(&resp.over_cap_dates, prefs.max_events_per_day);
    Ok(())
}

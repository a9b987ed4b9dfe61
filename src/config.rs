use crate::error::{PlanResult, PlannerError};
use crate::model::ClockTime;
use clap::parser::ValueSource;
use clap::{ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub planner: PlannerParams,
    #[command(flatten)]
    pub weights: ScoringWeights,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerParams {
    // Festival session structure: one show per canonical slot per night
    #[arg(long, default_value = "19:15,21:00")]
    pub slot_times: String,
    #[arg(long, default_value_t = 30)]
    pub slot_tolerance: u16,

    // === ALTERNATIVES ===
    #[arg(long, default_value_t = 0.85)]
    pub alt_overlap_threshold: f64,
    #[arg(long, default_value_t = 2)]
    pub max_alternatives: usize,
    #[arg(long, default_value_t = 0.1)]
    pub perturb_amplitude: f64,
    #[arg(long, default_value_t = 42)]
    pub perturb_seed: u64,

    #[arg(long, default_value_t = 4)]
    pub default_max_per_day: u32,
}

impl Default for PlannerParams {
    fn default() -> Self {
        Self {
            slot_times: "19:15,21:00".to_string(),
            slot_tolerance: 30,
            alt_overlap_threshold: 0.85,
            max_alternatives: 2,
            perturb_amplitude: 0.1,
            perturb_seed: 42,
            default_max_per_day: 4,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    #[arg(long, default_value_t = 50.0)]
    pub bonus_category: f64,
    #[arg(long, default_value_t = 25.0)]
    pub bonus_venue: f64,

    // Shorter shows leave room for more of them
    #[arg(long, default_value_t = 30)]
    pub duration_pivot: u32,
    #[arg(long, default_value_t = 0.5)]
    pub duration_bonus_per_min: f64,

    #[arg(long, default_value_t = 1440.0)]
    pub end_of_day: f64,
    #[arg(long, default_value_t = 200.0)]
    pub end_time_divisor: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            bonus_category: 50.0,
            bonus_venue: 25.0,
            duration_pivot: 30,
            duration_bonus_per_min: 0.5,
            end_of_day: 1440.0,
            end_time_divisor: 200.0,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PlanResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PlannerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PlanResult<()> {
        self.planner.get_slot_times()?;
        if !(0.0..=1.0).contains(&self.planner.alt_overlap_threshold) {
            return Err(PlannerError::Config(format!(
                "alt_overlap_threshold must be within [0, 1], got {}",
                self.planner.alt_overlap_threshold
            )));
        }
        if !(0.0..1.0).contains(&self.planner.perturb_amplitude) {
            return Err(PlannerError::Config(format!(
                "perturb_amplitude must be within [0, 1), got {}",
                self.planner.perturb_amplitude
            )));
        }
        if self.weights.end_time_divisor <= 0.0 {
            return Err(PlannerError::Config(
                "end_time_divisor must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlays only the flags the user actually typed onto a file config.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(planner.slot_times);
        update_if_present!(planner.slot_tolerance);
        update_if_present!(planner.alt_overlap_threshold);
        update_if_present!(planner.max_alternatives);
        update_if_present!(planner.perturb_amplitude);
        update_if_present!(planner.perturb_seed);
        update_if_present!(planner.default_max_per_day);

        update_if_present!(weights.bonus_category);
        update_if_present!(weights.bonus_venue);
        update_if_present!(weights.duration_pivot);
        update_if_present!(weights.duration_bonus_per_min);
        update_if_present!(weights.end_of_day);
        update_if_present!(weights.end_time_divisor);
    }
}

impl PlannerParams {
    pub fn get_slot_times(&self) -> PlanResult<Vec<ClockTime>> {
        let slots = self
            .slot_times
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect::<PlanResult<Vec<ClockTime>>>()?;

        if slots.is_empty() {
            return Err(PlannerError::Config(
                "--slot-times requires at least one HH:MM value".to_string(),
            ));
        }
        Ok(slots)
    }
}

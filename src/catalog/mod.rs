pub mod loader;

use self::loader::{date_ordinal, load_instances_json, load_performances, RawPerformance};
use crate::error::{PlanResult, PlannerError};
use crate::model::PerformanceInstance;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// The full instance catalog the optimizer draws from.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub instances: Vec<PerformanceInstance>,
}

impl Catalog {
    pub fn new(instances: Vec<PerformanceInstance>) -> PlanResult<Self> {
        validate_instances(&instances)?;
        Ok(Self { instances })
    }

    /// Opens a `.csv` performance sheet or a `.json` instance array.
    pub fn open<P: AsRef<Path>>(path: P) -> PlanResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            PlannerError::Config(format!("Could not open catalog at '{}': {}", path.display(), e))
        })?;
        let reader = BufReader::new(file);

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let instances = match ext.as_deref() {
            Some("csv") => build_instances(&load_performances(reader)?),
            Some("json") => load_instances_json(reader)?,
            _ => {
                return Err(PlannerError::Config(format!(
                    "Unsupported catalog format '{}' (expected .csv or .json)",
                    path.display()
                )))
            }
        };

        info!(
            "📂 Catalog '{}': {} instances",
            path.display(),
            instances.len()
        );
        Self::new(instances)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PerformanceInstance> {
        self.instances.iter().find(|i| i.id == id)
    }
}

/// Groups sheet rows into events by `(title, artist, main venue, start)` and
/// emits one instance per distinct date, event by event in first-seen order.
pub fn build_instances(rows: &[RawPerformance]) -> Vec<PerformanceInstance> {
    let mut group_of: HashMap<(&str, &str, &str, u16), usize> = HashMap::new();
    let mut groups: Vec<Vec<&RawPerformance>> = Vec::new();

    for row in rows {
        let key = (
            row.title.as_str(),
            row.artist.as_str(),
            row.main_venue.as_str(),
            row.time.minutes(),
        );
        let idx = *group_of.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        if groups[idx].iter().all(|r| r.date != row.date) {
            groups[idx].push(row);
        }
    }

    let mut out = Vec::new();
    for (n, dates) in groups.iter().enumerate() {
        let event_id = format!("evt-{}", n + 1);
        for row in dates {
            out.push(PerformanceInstance {
                id: format!("{}@{}", row.row_id, row.date),
                event_id: event_id.clone(),
                date: row.date.clone(),
                date_obj: date_ordinal(&row.date),
                start_time: row.time,
                end_time: row.end,
                venue: row.main_venue.clone(),
                specific_venue: row.specific_venue.clone(),
                title: row.title.clone(),
                artist: row.artist.clone(),
                category: row.category.clone(),
                sub_category: row.sub_category.clone(),
                duration_minutes: None,
            });
        }
    }
    out
}

/// Boundary checks: unique ids and `end > start` for every instance.
pub fn validate_instances(instances: &[PerformanceInstance]) -> PlanResult<()> {
    let mut seen = HashSet::new();
    for inst in instances {
        if !seen.insert(inst.id.as_str()) {
            return Err(PlannerError::Validation(format!(
                "duplicate instance id '{}'",
                inst.id
            )));
        }
        if inst.end_time <= inst.start_time {
            return Err(PlannerError::Validation(format!(
                "instance '{}' ends ({}) before it starts ({})",
                inst.id, inst.end_time, inst.start_time
            )));
        }
    }
    Ok(())
}

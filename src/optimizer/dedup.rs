use crate::scorer::ScoredInstance;
use std::collections::HashMap;

/// Collapses instances sharing an `event_id` to the best-scoring one.
///
/// Groups appear in first-encounter order. On equal scores the instance
/// seen first is kept.
pub fn dedupe_by_event(scored: Vec<ScoredInstance>) -> Vec<ScoredInstance> {
    let mut slot_of: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<ScoredInstance> = Vec::new();

    for candidate in scored {
        match slot_of.get(&candidate.instance.event_id) {
            Some(&idx) => {
                if candidate.score > kept[idx].score {
                    kept[idx] = candidate;
                }
            }
            None => {
                slot_of.insert(candidate.instance.event_id.clone(), kept.len());
                kept.push(candidate);
            }
        }
    }

    kept
}

use crate::error::{PlanResult, PlannerError};
use crate::model::{ClockTime, PerformanceInstance};
use chrono::NaiveDate;
use std::io::Read;
use tracing::{debug, warn};

pub const DEFAULT_DURATION_MIN: u32 = 75;

/// One row of the festival performance sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPerformance {
    pub row_id: String,
    pub category: String,
    pub sub_category: String,
    pub title: String,
    pub artist: String,
    pub main_venue: String,
    pub specific_venue: String,
    pub city: String,
    pub date: String,
    pub time: ClockTime,
    pub duration: u32,
    pub end: ClockTime,
    pub description: String,
}

/// Parses the performance CSV:
/// `Event_ID,Category,Sub_Category,Event_Name,Venue,City,Date,Time,Duration_Minutes,Description`.
///
/// Short rows, zero-length shows and shows running past midnight are
/// skipped with a warning. A bad `Time` or `Date` aborts the load.
pub fn load_performances<R: Read>(reader: R) -> PlanResult<Vec<RawPerformance>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut skipped = 0;

    for (idx, result) in rdr.records().enumerate() {
        let rec = result?;
        let line = idx + 2;

        if rec.len() < 8 || rec.iter().all(|f| f.is_empty()) {
            warn!("[Row {}] expected at least 8 fields, got {}", line, rec.len());
            skipped += 1;
            continue;
        }

        let (artist, title) = split_event_name(&rec[3]);
        let (main_venue, specific_venue) = split_venue(&rec[4]);

        let date = normalize_date(&rec[6]).ok_or_else(|| {
            PlannerError::Validation(format!("[Row {}] unrecognised date '{}'", line, &rec[6]))
        })?;
        let time: ClockTime = rec[7].parse()?;

        let duration = match rec.get(8).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse().map_err(|_| {
                PlannerError::Validation(format!("[Row {}] bad duration '{}'", line, raw))
            })?,
            None => DEFAULT_DURATION_MIN,
        };

        let end = match time.checked_add(duration) {
            Some(end) if duration > 0 => end,
            _ => {
                warn!(
                    "[Row {}] {} + {} min is empty or runs past midnight, skipping",
                    line, time, duration
                );
                skipped += 1;
                continue;
            }
        };

        rows.push(RawPerformance {
            row_id: rec[0].to_string(),
            category: rec[1].to_string(),
            sub_category: rec[2].to_string(),
            title,
            artist,
            main_venue,
            specific_venue,
            city: rec[5].to_string(),
            date,
            time,
            duration,
            end,
            description: rec.get(9).unwrap_or_default().to_string(),
        });
    }

    if skipped > 0 {
        warn!("Skipped {} unusable rows in performance sheet.", skipped);
    }
    debug!("Loaded {} performances", rows.len());

    Ok(rows)
}

/// Reads a JSON array of already-flattened instances.
pub fn load_instances_json<R: Read>(reader: R) -> PlanResult<Vec<PerformanceInstance>> {
    Ok(serde_json::from_reader(reader)?)
}

/// `"Artist - Title"` -> `(artist, title)`. Further dashes stay in the title.
pub fn split_event_name(raw: &str) -> (String, String) {
    match raw.split_once(" - ") {
        Some((artist, title)) => (artist.trim().to_string(), title.trim().to_string()),
        None => ("Unknown Artist".to_string(), raw.trim().to_string()),
    }
}

/// `"Stage, Hall, Main Venue"` -> `("Main Venue", "Stage, Hall")`.
pub fn split_venue(raw: &str) -> (String, String) {
    match raw.rsplit_once(", ") {
        Some((specific, main)) => (main.trim().to_string(), specific.trim().to_string()),
        None => (raw.trim().to_string(), String::new()),
    }
}

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d-%m-%Y"];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Accepts `YYYY-MM-DD` or `DD-MM-YYYY`, returns `YYYY-MM-DD`.
pub fn normalize_date(raw: &str) -> Option<String> {
    parse_date(raw).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Days since 1970-01-01; 0 when the date does not parse.
pub fn date_ordinal(raw: &str) -> i64 {
    match (parse_date(raw), NaiveDate::from_ymd_opt(1970, 1, 1)) {
        (Some(date), Some(epoch)) => (date - epoch).num_days(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_name_split() {
        assert_eq!(
            split_event_name("Ravi Shankar - Evening Raga - Part II"),
            ("Ravi Shankar".to_string(), "Evening Raga - Part II".to_string())
        );
        assert_eq!(
            split_event_name("Untitled"),
            ("Unknown Artist".to_string(), "Untitled".to_string())
        );
    }

    #[test]
    fn venue_split_takes_last_part_as_main() {
        assert_eq!(
            split_venue("Amphitheatre, Gujarat University"),
            ("Gujarat University".to_string(), "Amphitheatre".to_string())
        );
        assert_eq!(split_venue("ATIRA"), ("ATIRA".to_string(), String::new()));
    }

    #[test]
    fn dates_normalize_and_order() {
        assert_eq!(normalize_date("14-11-2025").as_deref(), Some("2025-11-14"));
        assert_eq!(normalize_date("2025-11-14").as_deref(), Some("2025-11-14"));
        assert_eq!(normalize_date("2025-02-30"), None);
        assert_eq!(normalize_date("14-Nov-2025"), None);

        assert_eq!(date_ordinal("1970-01-01"), 0);
        assert_eq!(date_ordinal("2000-03-01"), 11_017);
        assert_eq!(date_ordinal("2025-11-15") - date_ordinal("2025-11-14"), 1);
        assert_eq!(date_ordinal("garbage"), 0);
        assert_eq!(date_ordinal("15-11-2025"), date_ordinal("2025-11-15"));
    }

    #[test]
    fn rows_that_cannot_end_same_day_are_skipped() {
        let sheet = "\
Event_ID,Category,Sub_Category,Event_Name,Venue,City,Date,Time,Duration_Minutes,Description
1,Music,Folk,A - Early,ATIRA,Ahmedabad,2025-11-14,21:00,60,
2,Music,Folk,A - Late,ATIRA,Ahmedabad,2025-11-14,23:59,,
3,Music,Folk,A - Long,ATIRA,Ahmedabad,2025-11-14,23:30,75,
4,Music,Folk,A - Empty,ATIRA,Ahmedabad,2025-11-14,20:00,0,
";
        let rows = load_performances(std::io::Cursor::new(sheet)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row_id, "1");
        assert_eq!(rows[0].end.to_string(), "22:00");
    }
}

#![allow(dead_code)]

use festplan::model::{PerformanceInstance, Preferences};

pub fn inst(
    id: &str,
    event: &str,
    date: &str,
    start: &str,
    end: &str,
    venue: &str,
    category: &str,
) -> PerformanceInstance {
    PerformanceInstance {
        id: id.to_string(),
        event_id: event.to_string(),
        date: date.to_string(),
        date_obj: 0,
        start_time: start.parse().unwrap(),
        end_time: end.parse().unwrap(),
        venue: venue.to_string(),
        specific_venue: String::new(),
        title: format!("Show {}", id),
        artist: String::new(),
        category: category.to_string(),
        sub_category: String::new(),
        duration_minutes: None,
    }
}

pub fn music_on(dates: &[&str]) -> Preferences {
    Preferences::new(["Music"], dates.iter().copied())
}

pub const SHEET_HEADER: &str =
    "Event_ID,Category,Sub_Category,Event_Name,Venue,City,Date,Time,Duration_Minutes,Description";

/// Two nights, two venues, both canonical slots.
pub fn sample_sheet() -> String {
    let rows = [
        "1,Music,Classical,Asha - Evening Raga,\"Hall A, ATIRA\",Ahmedabad,2025-11-14,19:15,75,",
        "2,Music,Folk,Kiran - River Songs,Gujarat University,Ahmedabad,2025-11-14,21:00,60,",
        "3,Dance,Kathak,Mira - Footwork,ATIRA,Ahmedabad,2025-11-14,21:00,,",
        "4,Music,Classical,Asha - Evening Raga,\"Hall A, ATIRA\",Ahmedabad,2025-11-15,19:15,75,",
        "5,Theatre,Drama,Ravi - Long Night,Shreyas Foundation,Ahmedabad,2025-11-15,21:00,90,",
    ];
    format!("{}\n{}\n", SHEET_HEADER, rows.join("\n"))
}

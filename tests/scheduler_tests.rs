mod common;

use common::{inst, music_on};
use festplan::api::{generate_schedule_preview, ScheduleRequest};
use festplan::error::PlannerError;
use festplan::optimizer::runner::{Planner, PlannerOptions};
use rstest::rstest;

fn planner() -> Planner {
    Planner::new(PlannerOptions::default())
}

#[test]
fn two_slots_two_venues_both_selected() {
    let pool = vec![
        inst("a", "e1", "2024-01-01", "19:00", "20:00", "X", "Music"),
        inst("b", "e2", "2024-01-01", "20:30", "21:30", "Y", "Music"),
    ];
    let out = planner().optimize(&pool, &music_on(&["2024-01-01"]), false);

    assert_eq!(out.optimized.schedule.ids(), vec!["a", "b"]);
    // 51.2 + 50.8
    assert!((out.optimized.total_score - 102.0).abs() < 1e-9);
}

#[test]
fn overlap_keeps_the_earlier_finisher() {
    let pool = vec![
        inst("a", "e1", "2024-01-01", "19:00", "20:00", "X", "Music"),
        inst("b", "e2", "2024-01-01", "19:15", "20:15", "Y", "Music"),
    ];
    let out = planner().optimize(&pool, &music_on(&["2024-01-01"]), false);

    // 51.2 beats 51.1
    assert_eq!(out.optimized.schedule.ids(), vec!["a"]);
}

#[test]
fn repeated_event_is_scheduled_once() {
    let pool = vec![
        inst("a1", "e1", "2024-01-01", "19:15", "20:30", "X", "Music"),
        inst("a2", "e1", "2024-01-02", "19:15", "20:00", "X", "Music"),
        inst("a3", "e1", "2024-01-03", "19:15", "20:30", "X", "Music"),
    ];
    let prefs = music_on(&["2024-01-01", "2024-01-02", "2024-01-03"]);
    let out = planner().optimize(&pool, &prefs, false);

    // the earliest finisher scores highest
    assert_eq!(out.optimized.schedule.ids(), vec!["a2"]);
}

#[test]
fn venue_lock_keeps_one_venue_per_night() {
    let pool = vec![
        inst("a", "e1", "2024-01-01", "19:15", "20:30", "X", "Music"),
        inst("b", "e2", "2024-01-01", "21:00", "22:15", "Y", "Music"),
    ];
    let prefs = music_on(&["2024-01-01"]).with_venue_switches(false);
    let out = planner().optimize(&pool, &prefs, false);
    assert_eq!(out.optimized.schedule.ids(), vec!["a"]);

    let open = music_on(&["2024-01-01"]);
    let out = planner().optimize(&pool, &open, false);
    assert_eq!(out.optimized.schedule.len(), 2);
}

#[test]
fn same_slot_is_exclusive_even_without_overlap() {
    let pool = vec![
        inst("a", "e1", "2024-01-01", "19:00", "19:30", "X", "Music"),
        inst("b", "e2", "2024-01-01", "19:35", "20:00", "X", "Music"),
    ];
    let out = planner().optimize(&pool, &music_on(&["2024-01-01"]), false);
    assert_eq!(out.optimized.schedule.len(), 1);
}

#[test]
fn different_dates_never_conflict() {
    let pool = vec![
        inst("a", "e1", "2024-01-01", "19:15", "20:30", "X", "Music"),
        inst("b", "e2", "2024-01-02", "19:15", "20:30", "Y", "Music"),
    ];
    let prefs = music_on(&["2024-01-01", "2024-01-02"]).with_venue_switches(false);
    let out = planner().optimize(&pool, &prefs, false);
    assert_eq!(out.optimized.schedule.ids(), vec!["a", "b"]);
}

#[rstest]
#[case::no_available_dates(&["2024-02-01"], 0)]
#[case::one_date(&["2024-01-01"], 1)]
#[case::both_dates(&["2024-01-01", "2024-01-02"], 2)]
fn only_available_dates_are_planned(#[case] dates: &[&str], #[case] expected: usize) {
    let pool = vec![
        inst("a", "e1", "2024-01-01", "19:15", "20:30", "X", "Music"),
        inst("b", "e2", "2024-01-02", "21:00", "22:15", "X", "Dance"),
    ];
    let out = planner().optimize(&pool, &music_on(dates), false);
    assert_eq!(out.optimized.schedule.len(), expected);
    assert!(out
        .optimized
        .schedule
        .iter()
        .all(|i| dates.contains(&i.date.as_str())));
}

#[test]
fn empty_catalog_gives_empty_result() {
    let out = planner().optimize(&[], &music_on(&["2024-01-01"]), true);
    assert!(out.optimized.schedule.is_empty());
    assert_eq!(out.optimized.total_score, 0.0);
    assert!(out.alternatives.is_empty());
}

#[rstest]
#[case::no_categories(vec![], vec!["2024-01-01".to_string()])]
#[case::no_dates(vec!["Music".to_string()], vec![])]
fn request_without_preferences_is_rejected(
    #[case] categories: Vec<String>,
    #[case] dates: Vec<String>,
) {
    let req = ScheduleRequest {
        instances: vec![inst("a", "e1", "2024-01-01", "19:15", "20:30", "X", "Music")],
        preferred_categories: categories,
        available_dates: dates,
        ..Default::default()
    };
    let err = generate_schedule_preview(&planner(), &req).unwrap_err();
    assert!(matches!(err, PlannerError::Validation(_)));
}

#[test]
fn inverted_instance_is_rejected_at_the_boundary() {
    let req = ScheduleRequest {
        instances: vec![inst("a", "e1", "2024-01-01", "21:00", "19:15", "X", "Music")],
        preferred_categories: vec!["Music".to_string()],
        available_dates: vec!["2024-01-01".to_string()],
        ..Default::default()
    };
    assert!(generate_schedule_preview(&planner(), &req).is_err());
}

#[test]
fn request_json_round_trips_through_the_api() {
    let body = r#"{
        "instances": [
            {"id": "a", "eventId": "e1", "date": "2024-01-01", "dateObj": 19723,
             "startTime": "19:00", "endTime": "20:00", "venue": "X", "specificVenue": "",
             "title": "Raga", "artist": "Asha", "category": "Music", "subCategory": ""},
            {"id": "b", "eventId": "e2", "date": "2024-01-01", "dateObj": 19723,
             "startTime": "20:30", "endTime": "21:30", "venue": "Y", "specificVenue": "",
             "title": "Folk", "artist": "Kiran", "category": "Music", "subCategory": ""}
        ],
        "preferredCategories": ["Music"],
        "availableDates": ["2024-01-01"],
        "generateAlternatives": true
    }"#;
    let req: ScheduleRequest = serde_json::from_str(body).unwrap();
    let resp = generate_schedule_preview(&planner(), &req).unwrap();

    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(json["optimizedSchedule"][0]["id"], "a");
    assert_eq!(json["optimizedSchedule"][1]["startTime"], "20:30");
    assert!(json["alternatives"].as_array().unwrap().len() <= 2);
    assert!(json["overCapDates"].as_array().unwrap().is_empty());
}

#[test]
fn malformed_time_fails_deserialization() {
    let body = r#"{"id": "a", "eventId": "e1", "date": "2024-01-01",
        "startTime": "7pm", "endTime": "20:00", "venue": "X", "title": "t",
        "category": "Music"}"#;
    assert!(serde_json::from_str::<festplan::model::PerformanceInstance>(body).is_err());
}

use criterion::{criterion_group, criterion_main, Criterion};
use festplan::combos::ComboRules;
use festplan::model::{ClockTime, PerformanceInstance, Preferences};
use festplan::optimizer::runner::{Planner, PlannerOptions};
use std::hint::black_box;

fn setup_catalog(per_night: usize, nights: usize) -> Vec<PerformanceInstance> {
    let venues = ["ATIRA", "Gujarat University", "Shreyas Foundation"];
    let categories = ["Music", "Dance", "Theatre"];
    let mut rng = fastrand::Rng::with_seed(7);

    let mut out = Vec::new();
    for night in 0..nights {
        let date = format!("2025-11-{:02}", 10 + night);
        for i in 0..per_night {
            let start = 17 * 60 + rng.u16(0..72) * 5;
            let duration = rng.u16(20..=75);
            out.push(PerformanceInstance {
                id: format!("{}-{}", date, i),
                event_id: format!("evt-{}", rng.usize(0..per_night)),
                date: date.clone(),
                date_obj: night as i64,
                start_time: ClockTime::from_minutes(start).expect("start within day"),
                end_time: ClockTime::from_minutes(start + duration).expect("end within day"),
                venue: venues[i % venues.len()].to_string(),
                specific_venue: String::new(),
                title: format!("Show {}", i),
                artist: String::new(),
                category: categories[rng.usize(0..categories.len())].to_string(),
                sub_category: String::new(),
                duration_minutes: None,
            });
        }
    }
    out
}

fn criterion_benchmark(c: &mut Criterion) {
    let catalog = setup_catalog(40, 10);
    let dates: Vec<String> = (0..10).map(|n| format!("2025-11-{:02}", 10 + n)).collect();
    let prefs = Preferences::new(["Music", "Dance"], dates);
    let planner = Planner::new(PlannerOptions::default());

    c.bench_function("optimize (400 instances)", |b| {
        b.iter(|| planner.optimize(black_box(&catalog), black_box(&prefs), false))
    });

    c.bench_function("optimize + alternatives (400 instances)", |b| {
        b.iter(|| planner.optimize(black_box(&catalog), black_box(&prefs), true))
    });

    let rules = ComboRules::default();
    c.bench_function("combo days (400 instances)", |b| {
        b.iter(|| rules.find(black_box(&catalog)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

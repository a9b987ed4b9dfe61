use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use festplan::combos::ComboDay;
use festplan::optimizer::Selection;
use festplan::stats::CatalogStats;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Scores are the ones the run that built `selection` used.
pub fn print_selection(title: &str, selection: &Selection) {
    let schedule = &selection.schedule;
    println!("\n📅 === {} ===", title);
    if schedule.is_empty() {
        println!("(no compatible performances)");
        return;
    }

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Date").add_attribute(Attribute::Bold),
        Cell::new("Start"),
        Cell::new("End"),
        Cell::new("Venue"),
        Cell::new("Category"),
        Cell::new("Performance"),
        Cell::new("Score").fg(Color::Cyan),
    ]);
    if let Some(col) = table.column_mut(6) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for inst in schedule {
        let score = selection.score_of(&inst.id).unwrap_or_default();

        let performance = if inst.artist.is_empty() {
            inst.title.clone()
        } else {
            format!("{} - {}", inst.artist, inst.title)
        };
        table.add_row(vec![
            Cell::new(&inst.date).add_attribute(Attribute::Bold),
            Cell::new(inst.start_time),
            Cell::new(inst.end_time),
            Cell::new(&inst.venue),
            Cell::new(&inst.category),
            Cell::new(performance),
            Cell::new(format!("{:.1}", score)).fg(Color::Cyan),
        ]);
    }
    println!("{}", table);
    println!(
        "Selected: {} | Total score: {:.1}",
        schedule.len(),
        selection.total_score
    );
}

pub fn print_over_cap(dates: &[String], cap: u32) {
    for date in dates {
        println!("⚠️  {} is above the {} per day you asked for", date, cap);
    }
}

pub fn print_combos(days: &[ComboDay], limit: usize) {
    if days.is_empty() {
        println!("\nNo combo days found.");
        return;
    }

    for day in days {
        println!("\n🔗 {} ({} pairs)", day.date, day.combos.len());
        let mut table = new_table();
        table.set_header(vec![
            Cell::new("First").add_attribute(Attribute::Bold),
            Cell::new("At"),
            Cell::new("Then").add_attribute(Attribute::Bold),
            Cell::new("At"),
            Cell::new("Travel").fg(Color::Green),
        ]);

        for combo in day.combos.iter().take(limit) {
            table.add_row(vec![
                Cell::new(format!("{} {}", combo.first.start_time, combo.first.title)),
                Cell::new(&combo.first.venue),
                Cell::new(format!("{} {}", combo.second.start_time, combo.second.title)),
                Cell::new(&combo.second.venue),
                Cell::new(format!("{} min", combo.travel_minutes))
                    .set_alignment(CellAlignment::Right),
            ]);
        }
        println!("{}", table);
    }
}

fn print_counts(title: &str, rows: &[(String, usize)]) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new(title).add_attribute(Attribute::Bold),
        Cell::new("Count"),
    ]);
    for (name, count) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

pub fn print_stats(stats: &CatalogStats) {
    println!("\n📊 === CATALOG ===");
    println!(
        "Instances: {} | Events: {} | Artists: {}",
        stats.total_instances, stats.distinct_events, stats.distinct_artists
    );
    print_counts("Category", &stats.categories);
    print_counts("Venue", &stats.venues);
    print_counts("Busiest dates", &stats.top_dates);
}

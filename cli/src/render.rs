use korjournal_core::{JournalStats, TripRecord};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct TripRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "Datum")]
    date: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "Slut")]
    end: String,
    #[tabled(rename = "Min")]
    minutes: u32,
    #[tabled(rename = "Startplats")]
    origin: String,
    #[tabled(rename = "Slutplats")]
    destination: String,
    #[tabled(rename = "Km")]
    km: String,
    #[tabled(rename = "Syfte")]
    purpose: String,
}

/// Numbered listing of the current view. Row numbers start at 1 and feed
/// the `edit --row` / `delete --row` commands together with the same
/// filter flags.
pub fn print_trips(trips: &[&TripRecord]) {
    if trips.is_empty() {
        println!("No trips found.");
        return;
    }

    let rows: Vec<TripRow> = trips
        .iter()
        .enumerate()
        .map(|(i, trip)| TripRow {
            row: i + 1,
            date: trip.date.format("%Y-%m-%d").to_string(),
            start: trip.start_time.format("%H:%M").to_string(),
            end: trip.end_time.format("%H:%M").to_string(),
            minutes: trip.duration_minutes,
            origin: trip.origin.clone(),
            destination: trip.destination.clone(),
            km: format!("{:.1}", trip.distance_km),
            purpose: trip.purpose.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{table}");
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Månad")]
    month: String,
    #[tabled(rename = "Km")]
    km: String,
}

pub fn print_stats(stats: &JournalStats) {
    if stats.trip_count == 0 {
        println!("No trips found.");
        return;
    }

    println!("Trips:          {}", stats.trip_count);
    println!("Total distance: {:.1} km", stats.total_km);
    println!(
        "Total time:     {} h {} min",
        stats.total_minutes / 60,
        stats.total_minutes % 60
    );

    let rows: Vec<MonthRow> = stats
        .monthly_km
        .iter()
        .map(|(month, km)| MonthRow {
            month: month.clone(),
            km: format!("{km:.1}"),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{table}");
}

//! Plain-text rendering of records and totals.

use colored::Colorize;
use studylog_application::{GoalProgress, RecordsView};
use studylog_core::record::Record;

/// Formats hours without a trailing `.0` for whole numbers.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        let text = format!("{:.2}", hours);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub fn record_line(record: &Record) -> String {
    format!("{} | {}h", record.title, format_hours(record.duration))
}

pub fn total_line(progress: &GoalProgress) -> String {
    format!(
        "Total {}/{}h ({:.1}%)",
        format_hours(progress.total),
        format_hours(progress.goal),
        progress.ratio * 100.0
    )
}

/// Prints the record list followed by the total.
pub fn print_view(view: &RecordsView) {
    println!("{}", "Study records".bold());

    if view.records().is_empty() {
        println!("  {}", "(no records yet)".dimmed());
    }

    let id_width = view
        .records()
        .iter()
        .map(|r| r.id.as_str().len())
        .max()
        .unwrap_or(0);
    for record in view.records() {
        println!(
            "  {:>width$}  {}",
            record.id.as_str().dimmed(),
            record_line(record),
            width = id_width
        );
    }

    let progress = view.progress();
    let line = total_line(&progress);
    if progress.is_reached() {
        println!("{}", line.green().bold());
    } else {
        println!("{}", line.bold());
    }
}

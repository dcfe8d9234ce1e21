use super::table::{create_styled_table, visible};
use crate::config::DisplayRules;
use crate::fleet::ScheduledCharge;
use chrono::TimeDelta;
use comfy_table::Cell;
use serde_json::json;
use std::fmt::Write as _;

fn format_duration(duration: TimeDelta) -> String {
    format!(
        "{}h {:02}m",
        duration.num_hours(),
        duration.num_minutes() % 60
    )
}

fn total_cost(charges: &[&ScheduledCharge]) -> f64 {
    charges.iter().map(|c| c.estimated_cost).sum()
}

/// Charging schedule table, in schedule order
pub fn format_schedule_text(
    charges: &[&ScheduledCharge],
    total: usize,
    query: &str,
    rules: &DisplayRules,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Scheduled charges matching {} of {}",
        charges.len(),
        total
    );
    if !query.is_empty() {
        let _ = writeln!(out, "Query: \"{}\"", query);
    }

    if charges.is_empty() {
        let _ = writeln!(out, "No scheduled charges match the filter.");
        return out;
    }

    let mut table = create_styled_table(&[
        "#",
        "Vehicle",
        "Station",
        "Start",
        "End",
        "Duration",
        "Est. Cost",
    ]);

    let (shown, hidden) = visible(charges, rules);
    for charge in shown {
        table.add_row(vec![
            Cell::new(charge.id),
            Cell::new(&charge.vehicle),
            Cell::new(&charge.station),
            Cell::new(charge.start_time.format("%Y-%m-%d %H:%M")),
            Cell::new(charge.end_time.format("%Y-%m-%d %H:%M")),
            Cell::new(format_duration(charge.duration())),
            Cell::new(format!("${:.2}", charge.estimated_cost)),
        ]);
    }

    let _ = writeln!(out, "{table}");
    if hidden > 0 {
        let _ = writeln!(out, "... +{} more", hidden);
    }
    let _ = writeln!(out, "Total estimated cost: ${:.2}", total_cost(charges));
    out
}

pub fn format_schedule_json(charges: &[&ScheduledCharge], total: usize, query: &str) -> String {
    serde_json::to_string_pretty(&json!({
        "query": query,
        "total": total,
        "matches": charges.len(),
        "totalEstimatedCost": total_cost(charges),
        "schedule": charges,
    }))
    .unwrap_or_else(|_| "{\"schedule\":{\"error\":\"failed to serialize schedule\"}}".into())
}

use super::table::{create_styled_table, status_cell};
use crate::fleet::{ChargingStation, StationStatus, StatusKind, Vehicle, VehicleStatus};
use crate::roster::Rosterable;
use colored::Colorize;
use comfy_table::Cell;
use serde::Serialize;
use serde_json::json;
use std::fmt::Write as _;

/// Number of records holding one status value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
    pub percent: f64,
}

/// Count records per status, every status listed in enumeration order
pub fn status_counts<T>(records: &[&T]) -> Vec<StatusCount>
where
    T: Rosterable,
    T::Status: StatusKind,
{
    let total = records.len();
    <T::Status as StatusKind>::ALL
        .iter()
        .map(|status| {
            let count = records.iter().filter(|r| r.status() == *status).count();
            let percent = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };
            StatusCount {
                status: status.label().to_string(),
                count,
                percent,
            }
        })
        .collect()
}

/// Compact one-line status breakdown, e.g. "By status: Active 1, Idle 0"
pub fn format_status_line(counts: &[StatusCount]) -> String {
    let parts: Vec<String> = counts
        .iter()
        .map(|c| format!("{} {}", c.status, c.count))
        .collect();
    format!("By status: {}", parts.join(", "))
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetMetrics {
    pub vehicles: usize,
    pub avg_battery_health: Option<f64>,
    pub avg_soc: Option<f64>,
    pub v2g_capable: usize,
}

impl FleetMetrics {
    pub fn from_vehicles(vehicles: &[&Vehicle]) -> Self {
        Self {
            vehicles: vehicles.len(),
            avg_battery_health: average(vehicles.iter().map(|v| f64::from(v.battery_health))),
            avg_soc: average(vehicles.iter().map(|v| f64::from(v.soc))),
            v2g_capable: vehicles.iter().filter(|v| v.v2g_compatible).count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMetrics {
    pub stations: usize,
    /// Stations not down for maintenance
    pub active: usize,
    /// Stations currently charging a vehicle
    pub in_use: usize,
    pub avg_health: Option<f64>,
    pub max_temperature: Option<f64>,
}

impl StationMetrics {
    pub fn from_stations(stations: &[&ChargingStation]) -> Self {
        Self {
            stations: stations.len(),
            active: stations
                .iter()
                .filter(|s| matches!(s.status, StationStatus::Available | StationStatus::InUse))
                .count(),
            in_use: stations
                .iter()
                .filter(|s| s.status == StationStatus::InUse)
                .count(),
            avg_health: average(stations.iter().map(|s| f64::from(s.health))),
            max_temperature: stations.iter().map(|s| s.temperature).reduce(f64::max),
        }
    }
}

fn format_percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.1}%"))
        .unwrap_or_else(|| "-".to_string())
}

fn write_status_table<S: StatusKind>(out: &mut String, counts: &[StatusCount]) {
    let mut table = create_styled_table(&["Status", "Count", "Percent", "Distribution"]);

    for (status, count) in S::ALL.iter().zip(counts) {
        let bar_length = (count.percent.round() as usize / 2).min(50);
        table.add_row(vec![
            status_cell(*status),
            Cell::new(count.count),
            Cell::new(format!("{:>6.2}%", count.percent)),
            Cell::new("█".repeat(bar_length)),
        ]);
    }

    let _ = writeln!(out, "{table}");
}

/// Status distribution and health metrics of filtered vehicles and stations
pub fn format_summary_text(
    vehicles: &[&Vehicle],
    stations: &[&ChargingStation],
    query: &str,
) -> String {
    let mut out = String::new();

    if !query.is_empty() {
        let _ = writeln!(out, "Query: \"{}\"\n", query);
    }

    let fleet = FleetMetrics::from_vehicles(vehicles);
    let _ = writeln!(out, "{}", "FLEET".bold().cyan());
    let _ = writeln!(out, "Vehicles:             {}", fleet.vehicles);
    let _ = writeln!(
        out,
        "Avg battery health:   {}",
        format_percent(fleet.avg_battery_health)
    );
    let _ = writeln!(out, "Avg state of charge:  {}", format_percent(fleet.avg_soc));
    let _ = writeln!(out, "V2G capable:          {}", fleet.v2g_capable);
    write_status_table::<VehicleStatus>(&mut out, &status_counts(vehicles));

    let charging = StationMetrics::from_stations(stations);
    let _ = writeln!(out, "\n{}", "CHARGING STATIONS".bold().cyan());
    let _ = writeln!(
        out,
        "Active stations:      {} of {}",
        charging.active, charging.stations
    );
    let _ = writeln!(out, "Currently charging:   {}", charging.in_use);
    let _ = writeln!(
        out,
        "Avg health:           {}",
        format_percent(charging.avg_health)
    );
    let _ = writeln!(
        out,
        "Max temperature:      {}",
        charging
            .max_temperature
            .map(|t| format!("{t:.0}°C"))
            .unwrap_or_else(|| "-".to_string())
    );
    write_status_table::<StationStatus>(&mut out, &status_counts(stations));

    out
}

pub fn format_summary_json(
    vehicles: &[&Vehicle],
    stations: &[&ChargingStation],
    query: &str,
) -> String {
    serde_json::to_string_pretty(&json!({
        "summary": {
            "query": query,
            "vehicles": {
                "metrics": FleetMetrics::from_vehicles(vehicles),
                "statuses": status_counts(vehicles),
            },
            "stations": {
                "metrics": StationMetrics::from_stations(stations),
                "statuses": status_counts(stations),
            },
        }
    }))
    .unwrap_or_else(|_| "{\"summary\":{\"error\":\"failed to serialize summary\"}}".into())
}

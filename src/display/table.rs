use crate::config::DisplayRules;
use crate::fleet::{
    AlertSeverity, ChargingStation, MaintenanceAlert, StationStatus, StatusKind, StatusTone,
    Vehicle, VehicleStatus,
};
use crate::roster::RosterQuery;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use serde::Serialize;
use serde_json::json;
use std::fmt::Write as _;

/// Table with the house style: UTF-8 borders, bold headers
pub fn create_styled_table(headers: &[&str]) -> Table {
    let styled = colored::control::SHOULD_COLORIZE.should_colorize();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if styled {
        table.enforce_styling();
    }

    table.set_header(headers.iter().map(|header| {
        let cell = Cell::new(header);
        if styled {
            cell.add_attribute(Attribute::Bold)
        } else {
            cell
        }
    }));
    table
}

/// Status cell colored by tone when colors are enabled
pub fn status_cell<S: StatusKind>(status: S) -> Cell {
    let cell = Cell::new(status.label());
    if !colored::control::SHOULD_COLORIZE.should_colorize() {
        return cell;
    }

    let color = match status.tone() {
        StatusTone::Positive => Color::Green,
        StatusTone::Busy => Color::Blue,
        StatusTone::Neutral => Color::Yellow,
        StatusTone::Attention => Color::Red,
    };
    cell.fg(color)
}

fn heading<S: std::fmt::Display>(
    out: &mut String,
    noun: &str,
    shown: usize,
    total: usize,
    query: &RosterQuery<S>,
    status_label: &str,
) {
    let _ = writeln!(out, "{} matching {} of {}", noun, shown, total);
    if !query.query.is_empty() {
        let _ = writeln!(out, "Query: \"{}\"", query.query);
    }
    let _ = writeln!(out, "{}: {}", status_label, query.status);
}

pub(crate) fn visible<'a, T>(records: &'a [&'a T], rules: &DisplayRules) -> (&'a [&'a T], usize) {
    match rules.max_rows {
        Some(max) if records.len() > max => (&records[..max], records.len() - max),
        _ => (records, 0),
    }
}

pub fn format_vehicles_text(
    vehicles: &[&Vehicle],
    total: usize,
    query: &RosterQuery<VehicleStatus>,
    rules: &DisplayRules,
) -> String {
    let mut out = String::new();
    heading(&mut out, "Vehicles", vehicles.len(), total, query, "Status");

    if vehicles.is_empty() {
        let _ = writeln!(out, "No vehicles match the filter.");
        return out;
    }

    let mut table = create_styled_table(&[
        "Vehicle ID",
        "Type",
        "Model",
        "Status",
        "Battery Health",
        "SOC",
        "Location",
        "Last Charge",
    ]);

    let (shown, hidden) = visible(vehicles, rules);
    for vehicle in shown {
        table.add_row(vec![
            Cell::new(&vehicle.id),
            Cell::new(&vehicle.kind),
            Cell::new(&vehicle.model),
            status_cell(vehicle.status),
            Cell::new(format!("{}%", vehicle.battery_health)),
            Cell::new(format!("{}%", vehicle.soc)),
            Cell::new(&vehicle.location),
            Cell::new(vehicle.last_charge_time.format("%Y-%m-%d %H:%M")),
        ]);
    }

    let _ = writeln!(out, "{table}");
    if hidden > 0 {
        let _ = writeln!(out, "... +{} more", hidden);
    }
    out
}

pub fn format_stations_text(
    stations: &[&ChargingStation],
    total: usize,
    query: &RosterQuery<StationStatus>,
    rules: &DisplayRules,
) -> String {
    let mut out = String::new();
    heading(&mut out, "Stations", stations.len(), total, query, "Status");

    if stations.is_empty() {
        let _ = writeln!(out, "No stations match the filter.");
        return out;
    }

    let mut table = create_styled_table(&[
        "Station ID",
        "Location",
        "Status",
        "Power",
        "Vehicle",
        "Est. Time",
        "Health",
        "Temp",
        "Voltage",
    ]);

    let (shown, hidden) = visible(stations, rules);
    for station in shown {
        table.add_row(vec![
            Cell::new(&station.id),
            Cell::new(&station.location),
            status_cell(station.status),
            Cell::new(&station.power),
            Cell::new(station.current_vehicle.as_deref().unwrap_or("-")),
            Cell::new(station.estimated_time.as_deref().unwrap_or("-")),
            Cell::new(format!("{}%", station.health)),
            Cell::new(format!("{:.0}°C", station.temperature)),
            Cell::new(format!("{}V", station.voltage)),
        ]);
    }

    let _ = writeln!(out, "{table}");
    if hidden > 0 {
        let _ = writeln!(out, "... +{} more", hidden);
    }
    out
}

pub fn format_alerts_text(
    alerts: &[&MaintenanceAlert],
    total: usize,
    query: &RosterQuery<AlertSeverity>,
    rules: &DisplayRules,
) -> String {
    let mut out = String::new();
    heading(&mut out, "Alerts", alerts.len(), total, query, "Severity");

    if alerts.is_empty() {
        let _ = writeln!(out, "No alerts match the filter.");
        return out;
    }

    let mut table = create_styled_table(&["Alert ID", "Vehicle", "Issue", "Severity", "Predicted"]);

    let (shown, hidden) = visible(alerts, rules);
    for alert in shown {
        table.add_row(vec![
            Cell::new(&alert.id),
            Cell::new(&alert.vehicle),
            Cell::new(&alert.issue),
            status_cell(alert.severity),
            Cell::new(alert.predicted_date.format("%Y-%m-%d")),
        ]);
    }

    let _ = writeln!(out, "{table}");
    if hidden > 0 {
        let _ = writeln!(out, "... +{} more", hidden);
    }
    out
}

fn format_list_json<T: Serialize, S: std::fmt::Display>(
    key: &str,
    records: &[&T],
    total: usize,
    query: &RosterQuery<S>,
) -> String {
    serde_json::to_string_pretty(&json!({
        "filter": query,
        "total": total,
        "matches": records.len(),
        key: records,
    }))
    .unwrap_or_else(|_| format!("{{\"{key}\":{{\"error\":\"failed to serialize roster\"}}}}"))
}

pub fn format_vehicles_json(
    vehicles: &[&Vehicle],
    total: usize,
    query: &RosterQuery<VehicleStatus>,
) -> String {
    format_list_json("vehicles", vehicles, total, query)
}

pub fn format_stations_json(
    stations: &[&ChargingStation],
    total: usize,
    query: &RosterQuery<StationStatus>,
) -> String {
    format_list_json("stations", stations, total, query)
}

pub fn format_alerts_json(
    alerts: &[&MaintenanceAlert],
    total: usize,
    query: &RosterQuery<AlertSeverity>,
) -> String {
    format_list_json("alerts", alerts, total, query)
}

use super::table::{create_styled_table, status_cell};
use crate::fleet::{ChargingStation, RosterItem, Vehicle};
use colored::Colorize;
use comfy_table::Cell;
use serde_json::json;
use std::fmt::Write as _;

fn write_vehicle(out: &mut String, vehicle: &Vehicle) {
    let _ = writeln!(out, "{} {}", "Vehicle".bold(), vehicle.id.cyan());

    let mut table = create_styled_table(&["Field", "Value"]);
    table.add_row(vec![Cell::new("Type"), Cell::new(&vehicle.kind)]);
    table.add_row(vec![Cell::new("Model"), Cell::new(&vehicle.model)]);
    table.add_row(vec![Cell::new("Status"), status_cell(vehicle.status)]);
    table.add_row(vec![
        Cell::new("Battery Health"),
        Cell::new(format!("{}%", vehicle.battery_health)),
    ]);
    table.add_row(vec![
        Cell::new("State of Charge"),
        Cell::new(format!("{}%", vehicle.soc)),
    ]);
    table.add_row(vec![Cell::new("Location"), Cell::new(&vehicle.location)]);
    table.add_row(vec![
        Cell::new("Last Charge"),
        Cell::new(vehicle.last_charge_time.format("%Y-%m-%d %H:%M")),
    ]);
    table.add_row(vec![
        Cell::new("V2G Compatible"),
        Cell::new(if vehicle.v2g_compatible { "yes" } else { "no" }),
    ]);
    let _ = writeln!(out, "{table}");

    let _ = writeln!(out, "\n{}", "Maintenance History".bold());
    if vehicle.maintenance_history.is_empty() {
        let _ = writeln!(out, "No maintenance recorded.");
        return;
    }

    let mut history = create_styled_table(&["Date", "Type", "Status"]);
    for record in &vehicle.maintenance_history {
        history.add_row(vec![
            Cell::new(record.date),
            Cell::new(&record.kind),
            Cell::new(&record.status),
        ]);
    }
    let _ = writeln!(out, "{history}");
}

fn write_station(out: &mut String, station: &ChargingStation) {
    let _ = writeln!(out, "{} {}", "Station".bold(), station.id.cyan());

    let mut table = create_styled_table(&["Field", "Value"]);
    table.add_row(vec![Cell::new("Location"), Cell::new(&station.location)]);
    table.add_row(vec![Cell::new("Status"), status_cell(station.status)]);
    table.add_row(vec![Cell::new("Power"), Cell::new(&station.power)]);
    table.add_row(vec![
        Cell::new("Current Vehicle"),
        Cell::new(station.current_vehicle.as_deref().unwrap_or("-")),
    ]);
    table.add_row(vec![
        Cell::new("Estimated Time"),
        Cell::new(station.estimated_time.as_deref().unwrap_or("-")),
    ]);
    table.add_row(vec![
        Cell::new("Health"),
        Cell::new(format!("{}%", station.health)),
    ]);
    table.add_row(vec![
        Cell::new("Temperature"),
        Cell::new(format!("{:.0}°C", station.temperature)),
    ]);
    table.add_row(vec![
        Cell::new("Voltage"),
        Cell::new(format!("{}V", station.voltage)),
    ]);
    let _ = writeln!(out, "{table}");
}

pub fn format_item_text(item: RosterItem<'_>) -> String {
    let mut out = String::new();
    match item {
        RosterItem::Vehicle(vehicle) => write_vehicle(&mut out, vehicle),
        RosterItem::Station(station) => write_station(&mut out, station),
    }
    out
}

pub fn format_item_json(item: RosterItem<'_>) -> String {
    let value = match item {
        RosterItem::Vehicle(vehicle) => json!({ "vehicle": vehicle }),
        RosterItem::Station(station) => json!({ "station": station }),
    };
    serde_json::to_string_pretty(&value)
        .unwrap_or_else(|_| "{\"error\":\"failed to serialize roster item\"}".into())
}

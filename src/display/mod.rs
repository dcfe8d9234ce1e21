//! Rendering of filtered rosters
//!
//! Every formatter returns the full output as a `String` so callers can both
//! print it and write it to an output file.

mod detail;
mod schedule;
mod summary;
mod table;

pub use detail::{format_item_json, format_item_text};
pub use schedule::{format_schedule_json, format_schedule_text};
pub use summary::{
    FleetMetrics, StationMetrics, StatusCount, format_status_line, format_summary_json,
    format_summary_text, status_counts,
};
pub use table::{
    create_styled_table, format_alerts_json, format_alerts_text, format_stations_json,
    format_stations_text, format_vehicles_json, format_vehicles_text, status_cell,
};

mod entities;

pub use entities::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

const SAMPLE_ROSTER: &str = include_str!("fleet/sample_roster.json");

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Failed to read roster file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse roster '{path}': {message}")]
    Parse { path: String, message: String },
    #[error("Duplicate {section} id '{id}' in roster")]
    DuplicateId { section: &'static str, id: String },
    #[error("{section} entry '{entry}' references unknown {target} '{id}'")]
    UnknownReference {
        section: &'static str,
        entry: String,
        target: &'static str,
        id: String,
    },
    #[error("Scheduled charge {0} does not end after it starts")]
    EmptyWindow(u32),
    #[error("No vehicle or station with id '{0}'")]
    NotFound(String),
}

/// A snapshot of the fleet: vehicles, the stations that charge them, the
/// charging schedule and open maintenance alerts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roster {
    pub vehicles: Vec<Vehicle>,
    pub stations: Vec<ChargingStation>,
    pub schedule: Vec<ScheduledCharge>,
    pub alerts: Vec<MaintenanceAlert>,
}

/// A record selected by id
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RosterItem<'a> {
    Vehicle(&'a Vehicle),
    Station(&'a ChargingStation),
}

impl Roster {
    /// The built-in demo roster
    pub fn sample() -> Roster {
        static SAMPLE: LazyLock<Roster> = LazyLock::new(|| {
            parse_roster(SAMPLE_ROSTER, "<built-in sample>").expect("valid built-in roster")
        });
        SAMPLE.clone()
    }

    /// Check that ids are unique within each section and that schedule and
    /// alert entries point at known vehicles and stations
    pub fn validate(&self) -> Result<(), RosterError> {
        ensure_unique_ids("vehicle", self.vehicles.iter().map(|v| &v.id))?;
        ensure_unique_ids("station", self.stations.iter().map(|s| &s.id))?;
        ensure_unique_ids("schedule", self.schedule.iter().map(|c| c.id))?;
        ensure_unique_ids("alert", self.alerts.iter().map(|a| &a.id))?;

        for charge in &self.schedule {
            if self.find_vehicle(&charge.vehicle).is_none() {
                return Err(unknown_reference("schedule", charge.id, "vehicle", &charge.vehicle));
            }
            if self.find_station(&charge.station).is_none() {
                return Err(unknown_reference("schedule", charge.id, "station", &charge.station));
            }
            if charge.end_time <= charge.start_time {
                return Err(RosterError::EmptyWindow(charge.id));
            }
        }
        for alert in &self.alerts {
            if self.find_vehicle(&alert.vehicle).is_none() {
                return Err(unknown_reference("alert", &alert.id, "vehicle", &alert.vehicle));
            }
        }
        Ok(())
    }

    /// Scheduled charges whose vehicle or station id contains `query`, in
    /// schedule order
    pub fn schedule_matching(&self, query: &str) -> Vec<&ScheduledCharge> {
        self.schedule.iter().filter(|c| c.mentions(query)).collect()
    }

    pub fn find_vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn find_station(&self, id: &str) -> Option<&ChargingStation> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Select a vehicle or station by exact id, vehicles first
    pub fn lookup(&self, id: &str) -> Result<RosterItem<'_>, RosterError> {
        if let Some(vehicle) = self.find_vehicle(id) {
            return Ok(RosterItem::Vehicle(vehicle));
        }
        self.find_station(id)
            .map(RosterItem::Station)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))
    }
}

fn unknown_reference(
    section: &'static str,
    entry: impl ToString,
    target: &'static str,
    id: &str,
) -> RosterError {
    RosterError::UnknownReference {
        section,
        entry: entry.to_string(),
        target,
        id: id.to_string(),
    }
}

fn ensure_unique_ids<K: Copy + Eq + Hash + ToString>(
    section: &'static str,
    ids: impl Iterator<Item = K>,
) -> Result<(), RosterError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RosterError::DuplicateId {
                section,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Parse roster text, accepting JSON5 when strict JSON fails
pub fn parse_roster(raw: &str, source: &str) -> Result<Roster, RosterError> {
    let roster = match serde_json::from_str::<Roster>(raw) {
        Ok(roster) => roster,
        Err(strict_err) => {
            json5::from_str::<Roster>(raw).map_err(|lenient_err| RosterError::Parse {
                path: source.to_string(),
                message: format!("{strict_err} (as JSON5: {lenient_err})"),
            })?
        }
    };

    roster.validate()?;
    Ok(roster)
}

pub fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| RosterError::Read {
        path: path_display.clone(),
        source,
    })?;

    parse_roster(&raw, &path_display)
}

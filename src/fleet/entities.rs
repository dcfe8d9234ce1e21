use crate::filter::{FilterParseError, status_key};
use crate::roster::Rosterable;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a status should read at a glance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Ready or doing useful work
    Positive,
    /// Occupied, neither good nor bad
    Busy,
    /// Waiting
    Neutral,
    /// Out of service
    Attention,
}

/// A closed status enumeration shown in roster views
pub trait StatusKind: Copy + PartialEq + fmt::Display + 'static {
    /// Every status, in display order
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn tone(&self) -> StatusTone;

    /// Comma separated labels, for error messages
    fn expected_values() -> String {
        Self::ALL
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn parse_status<S: StatusKind>(s: &str) -> Result<S, FilterParseError> {
    let key = status_key(s);
    S::ALL
        .iter()
        .copied()
        .find(|status| status_key(status.label()) == key)
        .ok_or_else(|| FilterParseError::UnknownStatus {
            value: s.to_string(),
            expected: S::expected_values(),
        })
}

/// Operating status of a fleet vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VehicleStatus {
    Active,
    Idle,
    Charging,
    Maintenance,
}

impl StatusKind for VehicleStatus {
    const ALL: &'static [Self] = &[
        VehicleStatus::Active,
        VehicleStatus::Idle,
        VehicleStatus::Charging,
        VehicleStatus::Maintenance,
    ];

    fn label(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "Active",
            VehicleStatus::Idle => "Idle",
            VehicleStatus::Charging => "Charging",
            VehicleStatus::Maintenance => "Maintenance",
        }
    }

    fn tone(&self) -> StatusTone {
        match self {
            VehicleStatus::Active | VehicleStatus::Charging => StatusTone::Positive,
            VehicleStatus::Idle => StatusTone::Neutral,
            VehicleStatus::Maintenance => StatusTone::Attention,
        }
    }
}

/// Operating status of a charging station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StationStatus {
    Available,
    InUse,
    Maintenance,
}

impl StatusKind for StationStatus {
    const ALL: &'static [Self] = &[
        StationStatus::Available,
        StationStatus::InUse,
        StationStatus::Maintenance,
    ];

    fn label(&self) -> &'static str {
        match self {
            StationStatus::Available => "Available",
            StationStatus::InUse => "In Use",
            StationStatus::Maintenance => "Maintenance",
        }
    }

    fn tone(&self) -> StatusTone {
        match self {
            StationStatus::Available => StatusTone::Positive,
            StationStatus::InUse => StatusTone::Busy,
            StationStatus::Maintenance => StatusTone::Attention,
        }
    }
}

/// Urgency of a predicted maintenance issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

impl StatusKind for AlertSeverity {
    const ALL: &'static [Self] = &[AlertSeverity::Low, AlertSeverity::Medium, AlertSeverity::High];

    fn label(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "Low",
            AlertSeverity::Medium => "Medium",
            AlertSeverity::High => "High",
        }
    }

    fn tone(&self) -> StatusTone {
        match self {
            AlertSeverity::Low => StatusTone::Busy,
            AlertSeverity::Medium => StatusTone::Neutral,
            AlertSeverity::High => StatusTone::Attention,
        }
    }
}

macro_rules! status_conversions {
    ($($status:ty),*) => {$(
        impl fmt::Display for $status {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $status {
            type Err = FilterParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_status(s)
            }
        }

        impl TryFrom<String> for $status {
            type Error = FilterParseError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$status> for String {
            fn from(status: $status) -> Self {
                status.label().to_string()
            }
        }
    )*};
}

status_conversions!(VehicleStatus, StationStatus, AlertSeverity);

/// One entry of a vehicle's maintenance log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub date: NaiveDate,
    /// Kind of work (e.g., "Tire Rotation")
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form state (e.g., "Completed", "Scheduled")
    pub status: String,
}

/// An electric fleet vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: String,
    /// Vehicle class (e.g., "Heavy Duty", "Delivery Van")
    #[serde(rename = "type")]
    pub kind: String,
    pub model: String,
    pub status: VehicleStatus,
    /// Battery state of health in percent
    pub battery_health: u8,
    pub last_charge_time: NaiveDateTime,
    pub location: String,
    /// State of charge in percent
    pub soc: u8,
    pub v2g_compatible: bool,
    #[serde(default)]
    pub maintenance_history: Vec<MaintenanceRecord>,
}

impl Rosterable for Vehicle {
    type Status = VehicleStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.model.as_str(),
            self.kind.as_str(),
            self.location.as_str(),
        ]
    }

    fn status(&self) -> VehicleStatus {
        self.status
    }
}

/// A depot charging station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStation {
    pub id: String,
    pub location: String,
    pub status: StationStatus,
    /// Rated output (e.g., "150kW")
    pub power: String,
    #[serde(default)]
    pub current_vehicle: Option<String>,
    #[serde(default)]
    pub estimated_time: Option<String>,
    /// Hardware health in percent
    pub health: u8,
    /// Cabinet temperature in degrees Celsius
    pub temperature: f64,
    pub voltage: u32,
}

impl Rosterable for ChargingStation {
    type Status = StationStatus;

    fn id(&self) -> &str {
        &self.id
    }

    fn searchable_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str(), self.location.as_str()];
        if let Some(vehicle) = &self.current_vehicle {
            fields.push(vehicle);
        }
        fields
    }

    fn status(&self) -> StationStatus {
        self.status
    }
}

/// A planned charging session of one vehicle on one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledCharge {
    pub id: u32,
    /// Vehicle id
    pub vehicle: String,
    /// Station id
    pub station: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Expected energy cost in dollars
    pub estimated_cost: f64,
}

impl ScheduledCharge {
    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }

    /// Case-insensitive substring match on the vehicle or station id
    pub fn mentions(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        needle.is_empty()
            || self.vehicle.to_lowercase().contains(&needle)
            || self.station.to_lowercase().contains(&needle)
    }
}

/// A predicted maintenance issue raised for a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceAlert {
    pub id: String,
    /// Vehicle id
    pub vehicle: String,
    pub issue: String,
    pub severity: AlertSeverity,
    pub predicted_date: NaiveDate,
}

impl Rosterable for MaintenanceAlert {
    type Status = AlertSeverity;

    fn id(&self) -> &str {
        &self.id
    }

    fn searchable_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.vehicle.as_str(), self.issue.as_str()]
    }

    fn status(&self) -> AlertSeverity {
        self.severity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_status_parse_is_case_insensitive() {
        assert_eq!("charging".parse(), Ok(VehicleStatus::Charging));
        assert_eq!("IDLE".parse(), Ok(VehicleStatus::Idle));
        assert_eq!(" Maintenance ".trim().parse(), Ok(VehicleStatus::Maintenance));
    }

    #[test]
    fn test_station_status_accepts_spelling_variants() {
        for input in ["In Use", "in use", "in-use", "IN_USE", "inuse"] {
            assert_eq!(input.parse(), Ok(StationStatus::InUse), "input: {input}");
        }
    }

    #[test]
    fn test_unknown_status_lists_expected_values() {
        let err = "parked".parse::<VehicleStatus>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown status 'parked'. Valid values are: all, Active, Idle, Charging, Maintenance"
        );
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&StationStatus::InUse).unwrap();
        assert_eq!(json, "\"In Use\"");
        let status: StationStatus = serde_json::from_str("\"in use\"").unwrap();
        assert_eq!(status, StationStatus::InUse);
    }

    #[test]
    fn test_station_search_fields_include_current_vehicle() {
        let station = ChargingStation {
            id: "CS-002".to_string(),
            location: "Depot A".to_string(),
            status: StationStatus::InUse,
            power: "150kW".to_string(),
            current_vehicle: Some("Truck-001".to_string()),
            estimated_time: Some("45 min".to_string()),
            health: 92,
            temperature: 35.0,
            voltage: 480,
        };
        assert_eq!(
            station.searchable_fields(),
            vec!["CS-002", "Depot A", "Truck-001"]
        );
    }

    #[test]
    fn test_alert_severity_reads_lowercase_input() {
        let alert: MaintenanceAlert = serde_json::from_str(
            r#"{"id":"MA-9","vehicle":"Van-003","issue":"Charging port wear",
                "severity":"medium","predictedDate":"2024-03-01"}"#,
        )
        .unwrap();
        assert_eq!(alert.severity, AlertSeverity::Medium);
        assert_eq!(alert.status(), AlertSeverity::Medium);
        assert_eq!(serde_json::to_value(&alert).unwrap()["severity"], "Medium");
    }

    #[test]
    fn test_scheduled_charge_duration_and_mentions() {
        let charge: ScheduledCharge = serde_json::from_str(
            r#"{"id":1,"vehicle":"Truck-001","station":"CS-002",
                "startTime":"2024-01-08T14:00:00","endTime":"2024-01-08T15:30:00",
                "estimatedCost":45}"#,
        )
        .unwrap();
        assert_eq!(charge.duration(), TimeDelta::minutes(90));
        assert!(charge.mentions("cs-00"));
        assert!(charge.mentions("TRUCK"));
        assert!(charge.mentions(""));
        assert!(!charge.mentions("van"));
    }
}

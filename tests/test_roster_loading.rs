use fleet_roster::fleet::{Roster, RosterError, RosterItem, StationStatus, load_roster};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_sample_roster_survives_a_file_round_trip() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("fleet.json");
    let sample = Roster::sample();
    fs::write(&path, serde_json::to_string_pretty(&sample).unwrap()).expect("write roster");

    let loaded = load_roster(&path).expect("roster should load");
    assert_eq!(loaded, sample);
}

#[test]
fn test_json5_roster_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("fleet.json5");
    fs::write(
        &path,
        r#"{
  // yard chargers only
  stations: [
    {
      id: 'CS-101',
      location: 'North Yard',
      status: 'In Use',
      power: '350kW',
      currentVehicle: 'Bus-12',
      estimatedTime: '20 min',
      health: 97,
      temperature: 29.5,
      voltage: 800,
    },
  ],
}"#,
    )
    .expect("write roster");

    let roster = load_roster(&path).expect("json5 roster should load");
    assert!(roster.vehicles.is_empty());
    assert_eq!(roster.stations[0].status, StationStatus::InUse);
    assert_eq!(roster.stations[0].current_vehicle.as_deref(), Some("Bus-12"));
}

#[test]
fn test_unknown_status_in_file_is_a_parse_error() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("bad.json");
    fs::write(
        &path,
        r#"{"stations":[{"id":"CS-1","location":"A","status":"Broken","power":"50kW","health":1,"temperature":20,"voltage":400}]}"#,
    )
    .expect("write roster");

    let err = load_roster(&path).unwrap_err();
    assert!(matches!(err, RosterError::Parse { .. }));
    assert!(err.to_string().contains("Broken"), "got: {err}");
}

#[test]
fn test_duplicate_vehicle_ids_are_rejected() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("dupes.json");
    let mut roster = Roster::sample();
    let copy = roster.vehicles[1].clone();
    roster.vehicles.push(copy);
    fs::write(&path, serde_json::to_string(&roster).unwrap()).expect("write roster");

    let err = load_roster(&path).unwrap_err();
    assert_eq!(err.to_string(), "Duplicate vehicle id 'Van-003' in roster");
}

#[test]
fn test_missing_file_is_a_read_error() {
    let dir = tempdir().expect("temp dir");
    let result = load_roster(&dir.path().join("nope.json"));
    assert!(matches!(result, Err(RosterError::Read { .. })));
}

#[test]
fn test_lookup_prefers_exact_ids() {
    let roster = Roster::sample();
    match roster.lookup("Truck-002") {
        Ok(RosterItem::Vehicle(vehicle)) => assert_eq!(vehicle.model, "Volvo FH Electric"),
        other => panic!("expected vehicle, got {other:?}"),
    }
    assert!(matches!(roster.lookup("Truck"), Err(RosterError::NotFound(_))));
}

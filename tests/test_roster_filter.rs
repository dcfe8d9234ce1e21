use chrono::NaiveDateTime;
use fleet_roster::fleet::{
    AlertSeverity, ChargingStation, Roster, StationStatus, StatusKind, Vehicle, VehicleStatus,
};
use fleet_roster::roster::{RosterQuery, Rosterable, StatusFilter, filter_roster};
use std::fmt::Debug;

fn create_test_vehicle(id: &str, model: &str, status: VehicleStatus) -> Vehicle {
    Vehicle {
        id: id.to_string(),
        kind: "Delivery Van".to_string(),
        model: model.to_string(),
        status,
        battery_health: 90,
        last_charge_time: "2024-01-08T10:30:00".parse::<NaiveDateTime>().unwrap(),
        location: "Depot A".to_string(),
        soc: 50,
        v2g_compatible: false,
        maintenance_history: Vec::new(),
    }
}

fn two_vehicles() -> Vec<Vehicle> {
    vec![
        create_test_vehicle("VH001", "Ford E-Transit", VehicleStatus::Charging),
        create_test_vehicle("VH002", "Tesla Semi", VehicleStatus::Active),
    ]
}

fn ids<T: Rosterable>(records: &[&T]) -> Vec<String> {
    records.iter().map(|r| r.id().to_string()).collect()
}

const SAMPLE_TEXTS: [&str; 10] = [
    "", "semi", "DEPOT", "van", "-00", "e-t", "zzz", "Heavy Duty", "truck-001", "cs-",
];

fn sample_queries<S: StatusKind>() -> Vec<RosterQuery<S>> {
    let mut queries = Vec::new();
    for text in SAMPLE_TEXTS {
        queries.push(RosterQuery::new().with_query(text));
        for status in S::ALL {
            queries.push(
                RosterQuery::new()
                    .with_query(text)
                    .with_status(StatusFilter::Only(*status)),
            );
        }
    }
    queries
}

fn assert_status_filter_holds<T>(records: &[T])
where
    T: Rosterable,
    T::Status: StatusKind + Debug,
{
    for query in sample_queries::<T::Status>() {
        if let StatusFilter::Only(status) = query.status {
            for record in filter_roster(records, &query) {
                assert_eq!(record.status(), status, "{}: {query:?}", record.id());
            }
        }
    }
}

fn assert_query_containment_holds<T>(records: &[T])
where
    T: Rosterable,
    T::Status: StatusKind + Debug,
{
    for query in sample_queries::<T::Status>() {
        if query.query.is_empty() {
            continue;
        }
        let needle = query.query.to_lowercase();
        for record in filter_roster(records, &query) {
            assert!(
                record
                    .searchable_fields()
                    .iter()
                    .any(|f| f.to_lowercase().contains(&needle)),
                "{} does not contain {:?}",
                record.id(),
                query.query
            );
        }
    }
}

fn assert_idempotent<T>(records: &[T])
where
    T: Rosterable + Clone + PartialEq + Debug,
    T::Status: StatusKind + Debug,
{
    for query in sample_queries::<T::Status>() {
        let once: Vec<T> = filter_roster(records, &query).into_iter().cloned().collect();
        let twice: Vec<T> = filter_roster(&once, &query).into_iter().cloned().collect();
        assert_eq!(once, twice, "query: {query:?}");
    }
}

fn assert_order_preserved<T>(records: &[T])
where
    T: Rosterable,
    T::Status: StatusKind + Debug,
{
    for query in sample_queries::<T::Status>() {
        let positions: Vec<usize> = filter_roster(records, &query)
            .iter()
            .map(|r| {
                records
                    .iter()
                    .position(|candidate| candidate.id() == r.id())
                    .unwrap()
            })
            .collect();
        assert!(
            positions.windows(2).all(|w| w[0] < w[1]),
            "query: {query:?}"
        );
    }
}

#[test]
fn test_query_matches_model_case_insensitively() {
    let vehicles = two_vehicles();
    let query = RosterQuery::new().with_query("semi");
    assert_eq!(ids(&filter_roster(&vehicles, &query)), vec!["VH002"]);
}

#[test]
fn test_absent_status_yields_nothing() {
    let vehicles = two_vehicles();
    let query = RosterQuery::new().with_status(StatusFilter::Only(VehicleStatus::Maintenance));
    assert!(filter_roster(&vehicles, &query).is_empty());
}

#[test]
fn test_no_active_filters_is_identity() {
    let roster = Roster::sample();

    let query = RosterQuery::new();
    let expected: Vec<&Vehicle> = roster.vehicles.iter().collect();
    assert_eq!(filter_roster(&roster.vehicles, &query), expected);

    let query = RosterQuery::<StationStatus>::new();
    let expected: Vec<&ChargingStation> = roster.stations.iter().collect();
    assert_eq!(filter_roster(&roster.stations, &query), expected);

    let query = RosterQuery::<AlertSeverity>::new();
    assert_eq!(
        filter_roster(&roster.alerts, &query),
        roster.alerts.iter().collect::<Vec<_>>()
    );
}

#[test]
fn test_every_result_satisfies_the_status_filter() {
    let roster = Roster::sample();
    assert_status_filter_holds(&roster.vehicles);
    assert_status_filter_holds(&roster.stations);
    assert_status_filter_holds(&roster.alerts);
}

#[test]
fn test_every_result_contains_the_query() {
    let roster = Roster::sample();
    assert_query_containment_holds(&roster.vehicles);
    assert_query_containment_holds(&roster.stations);
    assert_query_containment_holds(&roster.alerts);
}

#[test]
fn test_filtering_is_idempotent() {
    let roster = Roster::sample();
    assert_idempotent(&roster.vehicles);
    assert_idempotent(&roster.stations);
    assert_idempotent(&roster.alerts);
}

#[test]
fn test_results_keep_roster_order() {
    let roster = Roster::sample();
    assert_order_preserved(&roster.vehicles);
    assert_order_preserved(&roster.stations);
    assert_order_preserved(&roster.alerts);
}

#[test]
fn test_alert_severity_and_issue_filter() {
    let roster = Roster::sample();
    let query = RosterQuery::new()
        .with_query("port")
        .with_status(StatusFilter::Only(AlertSeverity::Medium));
    assert_eq!(ids(&filter_roster(&roster.alerts, &query)), vec!["MA-002"]);
}

#[test]
fn test_station_query_matches_current_vehicle() {
    let roster = Roster::sample();
    let query = RosterQuery::new().with_query("truck-001");
    assert_eq!(ids(&filter_roster(&roster.stations, &query)), vec!["CS-002"]);
}

#[test]
fn test_filter_leaves_source_untouched() {
    let roster = Roster::sample();
    let before = roster.clone();
    let query = RosterQuery::new()
        .with_query("depot")
        .with_status(StatusFilter::Only(VehicleStatus::Idle));
    let _ = filter_roster(&roster.vehicles, &query);
    assert_eq!(roster, before);
}

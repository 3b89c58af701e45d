use chrono::{DateTime, Utc};

use switchboard::directory::picker::select_longest_idle;
use switchboard::models::operator::{OccupancyStatus, OperatorRecord};

fn operator(id: &str, status: OccupancyStatus, last_called_at: i64) -> OperatorRecord {
    OperatorRecord {
        id: id.into(),
        status,
        last_called_at: DateTime::<Utc>::from_timestamp(last_called_at, 0).expect("timestamp"),
        conversation_id: String::new(),
        number: String::new(),
    }
}

#[test]
fn picks_minimal_last_call_timestamp_among_idle() {
    let records = vec![
        operator("A", OccupancyStatus::Idle, 10),
        operator("B", OccupancyStatus::Idle, 5),
        operator("C", OccupancyStatus::OnCall, 1),
    ];

    let picked = select_longest_idle(&records).expect("an idle operator exists");
    assert_eq!(picked.id, "B");
}

#[test]
fn empty_directory_yields_none() {
    assert!(select_longest_idle(&[]).is_none());
}

#[test]
fn no_idle_operator_yields_none() {
    let records = vec![
        operator("A", OccupancyStatus::Ringing, 3),
        operator("B", OccupancyStatus::Dialing, 5),
        operator("C", OccupancyStatus::OnCall, 1),
    ];

    assert!(select_longest_idle(&records).is_none());
}

#[test]
fn tie_resolves_to_input_order() {
    let records = vec![
        operator("first", OccupancyStatus::Idle, 7),
        operator("second", OccupancyStatus::Idle, 7),
    ];

    let picked = select_longest_idle(&records).expect("idle operators exist");
    assert_eq!(picked.id, "first");
}

#[test]
fn busy_operator_with_older_timestamp_is_skipped() {
    let records = vec![
        operator("busy", OccupancyStatus::OnCall, 1),
        operator("free", OccupancyStatus::Idle, 100),
    ];

    let picked = select_longest_idle(&records).expect("idle operator exists");
    assert_eq!(picked.id, "free");
}

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use vitals_protocol::*;

fn sample_aggregate() -> DailyAggregate {
    DailyAggregate {
        step_counts: vec![500, 800],
        heart_rate_samples: vec![
            HeartRatePoint {
                bpm: 72.0,
                time: "2025-03-29T08:15:00Z".to_string(),
            },
            HeartRatePoint::missing(),
        ],
        total_calories_kcal: 150.5,
        distance_meters: 1234.5,
        active_calories_kcal: 80.25,
        total_sleep_minutes: 480,
        deep_sleep_minutes: 120,
        rem_sleep_minutes: 60,
        light_sleep_minutes: 300,
    }
}

#[test]
fn aggregate_serializes_with_camel_case_field_names() {
    let value: Value = serde_json::from_str(&sample_aggregate().to_json().unwrap()).unwrap();

    assert_eq!(
        value,
        json!({
            "stepCounts": [500, 800],
            "heartRateSamples": [
                { "bpm": 72.0, "time": "2025-03-29T08:15:00Z" },
                { "bpm": 0.0, "time": "null" }
            ],
            "totalCaloriesKcal": 150.5,
            "distanceMeters": 1234.5,
            "activeCaloriesKcal": 80.25,
            "totalSleepMinutes": 480,
            "deepSleepMinutes": 120,
            "remSleepMinutes": 60,
            "lightSleepMinutes": 300
        })
    );
}

#[test]
fn zero_aggregate_wire_shape() {
    let value: Value = serde_json::from_str(&DailyAggregate::default().to_json().unwrap()).unwrap();
    let object = value.as_object().unwrap();

    assert_eq!(object.len(), 9);
    assert_eq!(object["stepCounts"], json!([]));
    assert_eq!(object["heartRateSamples"], json!([]));
    assert_eq!(object["totalCaloriesKcal"], json!(0.0));
    assert_eq!(object["lightSleepMinutes"], json!(0));
}

#[test]
fn backend_payload_parses_back() {
    let body = r#"{
        "stepCounts": [12],
        "heartRateSamples": [{ "bpm": 64.0, "time": "2025-03-29T01:00:00Z" }],
        "totalCaloriesKcal": 10.0,
        "distanceMeters": 5.5,
        "activeCaloriesKcal": 2.0,
        "totalSleepMinutes": 30,
        "deepSleepMinutes": 10,
        "remSleepMinutes": 10,
        "lightSleepMinutes": 10
    }"#;

    let parsed = DailyAggregate::from_json(body).unwrap();
    assert_eq!(parsed.step_counts, vec![12]);
    assert_eq!(parsed.heart_rate_samples[0].bpm, 64.0);
    assert_eq!(parsed.total_sleep_minutes, 30);
}

#[test]
fn serialization_is_stable_across_calls() {
    let aggregate = sample_aggregate();
    assert_eq!(aggregate.to_json().unwrap(), aggregate.to_json().unwrap());
}

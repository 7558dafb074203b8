use std::path::PathBuf;

use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;

use vitals_platform::*;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("fixtures")
        .join("health-export.json")
}

fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn fixture_day() -> TimeRange {
    TimeRange::new(utc("2025-03-29T00:00:00Z"), utc("2025-03-29T18:00:00Z"))
}

#[tokio::test]
async fn fixture_grants_every_scope() {
    let store = ExportStore::new(fixture_path());

    let granted = store.request_permissions(&RecordType::ALL).await.unwrap();

    assert_eq!(granted.len(), RecordType::ALL.len());
    assert!(missing_scopes(&RecordType::ALL, &granted).is_empty());
}

#[tokio::test]
async fn steps_outside_the_day_are_dropped() {
    let store = ExportStore::new(fixture_path());

    let steps: Vec<StepRecord> = store.read(fixture_day()).await.unwrap();

    let counts: Vec<u64> = steps.iter().map(|s| s.count).collect();
    assert_eq!(counts, vec![500, 800]);
}

#[tokio::test]
async fn heart_rate_records_keep_empty_series() {
    let store = ExportStore::new(fixture_path());

    let records: Vec<HeartRateRecord> = store.read(fixture_day()).await.unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].samples.len(), 2);
    assert!(records[1].samples.is_empty());
}

#[tokio::test]
async fn overnight_sleep_session_is_included() {
    let store = ExportStore::new(fixture_path());

    let sessions: Vec<SleepSession> = store.read(fixture_day()).await.unwrap();

    assert_eq!(sessions.len(), 1);
    let stages: Vec<SleepStageType> = sessions[0].stages.iter().map(|s| s.stage).collect();
    assert_eq!(
        stages,
        vec![SleepStageType::Deep, SleepStageType::Light, SleepStageType::Rem]
    );
}

#[tokio::test]
async fn energy_and_distance_streams_load() {
    let store = ExportStore::new(fixture_path());

    let total: Vec<TotalCaloriesRecord> = store.read(fixture_day()).await.unwrap();
    let active: Vec<ActiveCaloriesRecord> = store.read(fixture_day()).await.unwrap();
    let distance: Vec<DistanceRecord> = store.read(fixture_day()).await.unwrap();

    assert_eq!(total.len(), 2);
    assert_eq!(active.len(), 2);
    assert_eq!(distance.len(), 2);
}

fn malformed_export() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, b"{ not json").unwrap();
    file
}

#[tokio::test]
async fn malformed_export_is_a_parse_error() {
    let file = malformed_export();
    let store = ExportStore::new(file.path());

    let err = store.request_permissions(&RecordType::ALL).await.unwrap_err();
    assert!(matches!(err, ProviderError::Parse(_)), "got {err:?}");

    let err = store.read::<StepRecord>(fixture_day()).await.unwrap_err();
    assert!(matches!(err, ProviderError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn missing_export_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let store = ExportStore::new(dir.path().join("health-export.json"));

    let err = store.read::<SleepSession>(fixture_day()).await.unwrap_err();
    assert!(matches!(err, ProviderError::Unavailable(_)), "got {err:?}");
}

//! Shared types for health record access.

use std::fmt;

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One readable record stream. Each variant doubles as the read scope for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordType {
    Steps,
    HeartRate,
    TotalCalories,
    Distance,
    ActiveCalories,
    SleepSession,
}

impl RecordType {
    /// Scopes a sync needs before it may start.
    pub const ALL: [RecordType; 6] = [
        RecordType::Steps,
        RecordType::HeartRate,
        RecordType::TotalCalories,
        RecordType::Distance,
        RecordType::ActiveCalories,
        RecordType::SleepSession,
    ];

    /// Returns a human-readable label for the record type.
    pub fn label(&self) -> &'static str {
        match self {
            RecordType::Steps => "Steps",
            RecordType::HeartRate => "Heart Rate",
            RecordType::TotalCalories => "Total Calories",
            RecordType::Distance => "Distance",
            RecordType::ActiveCalories => "Active Calories",
            RecordType::SleepSession => "Sleep",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Sleep stage classification reported inside a sleep session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SleepStageType {
    Awake,
    /// Asleep without a finer classification
    Sleeping,
    OutOfBed,
    Light,
    Deep,
    Rem,
    AwakeInBed,
    /// Stage could not be determined, or the store reported a type we don't know.
    /// Must stay last for `serde(other)`.
    #[default]
    #[serde(other)]
    Unknown,
}

impl SleepStageType {
    pub fn label(&self) -> &'static str {
        match self {
            SleepStageType::Unknown => "Unknown",
            SleepStageType::Awake => "Awake",
            SleepStageType::Sleeping => "Sleeping",
            SleepStageType::OutOfBed => "Out of Bed",
            SleepStageType::Light => "Light",
            SleepStageType::Deep => "Deep",
            SleepStageType::Rem => "REM",
            SleepStageType::AwakeInBed => "Awake in Bed",
        }
    }
}

impl fmt::Display for SleepStageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Half-open query window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window from local midnight of `now`'s day up to `now`.
    ///
    /// When midnight does not exist in the zone (a DST jump at 00:00) the window
    /// starts at the first valid local time after it.
    pub fn today<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let midnight = now.date_naive().and_time(NaiveTime::MIN);
        let end = now.with_timezone(&Utc);

        let start = tz
            .from_local_datetime(&midnight)
            .earliest()
            .or_else(|| {
                tz.from_local_datetime(&(midnight + Duration::hours(1)))
                    .earliest()
            })
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(end);

        Self { start, end }
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.start <= time && time < self.end
    }

    /// Whether the span `[start, end)` touches this window. A zero-length span
    /// is treated as an instant.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        if end <= start {
            return self.contains(start);
        }
        start < self.end && end > self.start
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_record_type_labels() {
        assert_eq!(RecordType::Steps.label(), "Steps");
        assert_eq!(RecordType::HeartRate.label(), "Heart Rate");
        assert_eq!(RecordType::SleepSession.to_string(), "Sleep");
    }

    #[test]
    fn test_required_scopes_cover_every_stream() {
        assert_eq!(RecordType::ALL.len(), 6);
        assert!(RecordType::ALL.contains(&RecordType::SleepSession));
    }

    #[test]
    fn test_record_type_serde_names() {
        assert_eq!(
            serde_json::to_string(&RecordType::ActiveCalories).unwrap(),
            "\"active_calories\""
        );
        let parsed: RecordType = serde_json::from_str("\"sleep_session\"").unwrap();
        assert_eq!(parsed, RecordType::SleepSession);
    }

    #[test]
    fn test_unknown_stage_string_maps_to_unknown() {
        let parsed: SleepStageType = serde_json::from_str("\"nap\"").unwrap();
        assert_eq!(parsed, SleepStageType::Unknown);
        let parsed: SleepStageType = serde_json::from_str("\"rem\"").unwrap();
        assert_eq!(parsed, SleepStageType::Rem);
    }

    #[test]
    fn test_unknown_is_default_and_round_trips() {
        assert_eq!(SleepStageType::default(), SleepStageType::Unknown);
        assert_eq!(
            serde_json::to_string(&SleepStageType::Unknown).unwrap(),
            "\"unknown\""
        );
        let parsed: SleepStageType = serde_json::from_str("\"awake_in_bed\"").unwrap();
        assert_eq!(parsed, SleepStageType::AwakeInBed);
    }

    #[test]
    fn test_today_starts_at_local_midnight() {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2025, 3, 29, 14, 30, 0).unwrap();

        let range = TimeRange::today(&now);

        assert_eq!(range.start, utc("2025-03-28T15:00:00Z"));
        assert_eq!(range.end, utc("2025-03-29T05:30:00Z"));
        assert_eq!(range.duration(), Duration::minutes(14 * 60 + 30));
    }

    #[test]
    fn test_range_is_half_open() {
        let range = TimeRange::new(utc("2025-03-29T00:00:00Z"), utc("2025-03-29T12:00:00Z"));
        assert!(range.contains(utc("2025-03-29T00:00:00Z")));
        assert!(range.contains(utc("2025-03-29T11:59:59Z")));
        assert!(!range.contains(utc("2025-03-29T12:00:00Z")));
        assert!(!range.contains(utc("2025-03-28T23:59:59Z")));
    }

    #[test]
    fn test_overlaps_catches_spans_crossing_midnight() {
        let range = TimeRange::new(utc("2025-03-29T00:00:00Z"), utc("2025-03-29T12:00:00Z"));
        assert!(range.overlaps(utc("2025-03-28T23:00:00Z"), utc("2025-03-29T07:00:00Z")));
        assert!(!range.overlaps(utc("2025-03-28T20:00:00Z"), utc("2025-03-29T00:00:00Z")));
        assert!(!range.overlaps(utc("2025-03-29T12:00:00Z"), utc("2025-03-29T13:00:00Z")));
        assert!(range.overlaps(utc("2025-03-29T05:00:00Z"), utc("2025-03-29T05:00:00Z")));
    }
}

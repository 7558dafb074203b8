//! Health record types as handed out by a provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{RecordType, SleepStageType, TimeRange};

/// A record stream a provider can be queried for.
pub trait HealthRecord: Clone + Send + Sync + 'static {
    /// The stream (and read scope) this record belongs to.
    const TYPE: RecordType;

    fn start_time(&self) -> DateTime<Utc>;

    fn end_time(&self) -> DateTime<Utc>;

    /// Borrow this stream out of a full record set.
    fn select(records: &RecordSet) -> &[Self];

    /// Records of this stream touching `range`, in stored order.
    ///
    /// Interval records match when they overlap the window, so a sleep session
    /// that began before midnight still counts toward today.
    fn in_range(records: &RecordSet, range: &TimeRange) -> Vec<Self> {
        Self::select(records)
            .iter()
            .filter(|r| range.overlaps(r.start_time(), r.end_time()))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    pub time: DateTime<Utc>,
    pub beats_per_minute: u32,
}

/// A series of heart-rate samples. May legitimately carry no samples at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub samples: Vec<HeartRateSample>,
}

/// Total energy burned, including basal metabolic rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalCaloriesRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub energy_kcal: f64,
}

/// Energy burned through activity only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveCaloriesRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub energy_kcal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub distance_meters: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepStage {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub stage: SleepStageType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepSession {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Ordered stages. Sessions recorded without staging have none.
    #[serde(default)]
    pub stages: Vec<SleepStage>,
}

/// Every stream a store holds, one list per record type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSet {
    pub steps: Vec<StepRecord>,
    pub heart_rate: Vec<HeartRateRecord>,
    pub total_calories: Vec<TotalCaloriesRecord>,
    pub distance: Vec<DistanceRecord>,
    pub active_calories: Vec<ActiveCaloriesRecord>,
    pub sleep_sessions: Vec<SleepSession>,
}

impl RecordSet {
    pub fn len(&self) -> usize {
        self.steps.len()
            + self.heart_rate.len()
            + self.total_calories.len()
            + self.distance.len()
            + self.active_calories.len()
            + self.sleep_sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HealthRecord for StepRecord {
    const TYPE: RecordType = RecordType::Steps;

    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    fn select(records: &RecordSet) -> &[Self] {
        &records.steps
    }
}

impl HealthRecord for HeartRateRecord {
    const TYPE: RecordType = RecordType::HeartRate;

    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    fn select(records: &RecordSet) -> &[Self] {
        &records.heart_rate
    }
}

impl HealthRecord for TotalCaloriesRecord {
    const TYPE: RecordType = RecordType::TotalCalories;

    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    fn select(records: &RecordSet) -> &[Self] {
        &records.total_calories
    }
}

impl HealthRecord for DistanceRecord {
    const TYPE: RecordType = RecordType::Distance;

    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    fn select(records: &RecordSet) -> &[Self] {
        &records.distance
    }
}

impl HealthRecord for ActiveCaloriesRecord {
    const TYPE: RecordType = RecordType::ActiveCalories;

    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    fn select(records: &RecordSet) -> &[Self] {
        &records.active_calories
    }
}

impl HealthRecord for SleepSession {
    const TYPE: RecordType = RecordType::SleepSession;

    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    fn select(records: &RecordSet) -> &[Self] {
        &records.sleep_sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn steps(start: &str, count: u64) -> StepRecord {
        StepRecord {
            start_time: utc(start),
            end_time: utc(start),
            count,
        }
    }

    #[test]
    fn test_in_range_keeps_order_and_drops_outside() {
        let set = RecordSet {
            steps: vec![
                steps("2025-03-28T23:59:00Z", 1),
                steps("2025-03-29T09:00:00Z", 500),
                steps("2025-03-29T10:00:00Z", 800),
                steps("2025-03-29T12:00:00Z", 3),
            ],
            ..Default::default()
        };
        let range = TimeRange::new(utc("2025-03-29T00:00:00Z"), utc("2025-03-29T12:00:00Z"));

        let counts: Vec<u64> = StepRecord::in_range(&set, &range)
            .iter()
            .map(|r| r.count)
            .collect();

        assert_eq!(counts, vec![500, 800]);
    }

    #[test]
    fn test_record_set_len() {
        let set = RecordSet {
            steps: vec![steps("2025-03-29T09:00:00Z", 5)],
            ..Default::default()
        };
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
        assert!(RecordSet::default().is_empty());
    }

    #[test]
    fn test_heart_rate_samples_default_to_empty() {
        let json = r#"{"start_time":"2025-03-29T09:00:00Z","end_time":"2025-03-29T09:05:00Z"}"#;
        let record: HeartRateRecord = serde_json::from_str(json).unwrap();
        assert!(record.samples.is_empty());
    }
}

use chrono::{DateTime, SecondsFormat, Utc};

use vitals_platform::{
    ActiveCaloriesRecord, DistanceRecord, HeartRateRecord, SleepSession, SleepStageType,
    StepRecord, TotalCaloriesRecord,
};
use vitals_protocol::{DailyAggregate, HeartRatePoint};

const MILLIS_PER_MINUTE: i64 = 60_000;

/// The six record lists of one day, already filtered to the query window.
#[derive(Debug, Clone, Default)]
pub struct DailyRecords {
    pub steps: Vec<StepRecord>,
    pub heart_rate: Vec<HeartRateRecord>,
    pub total_calories: Vec<TotalCaloriesRecord>,
    pub distance: Vec<DistanceRecord>,
    pub active_calories: Vec<ActiveCaloriesRecord>,
    pub sleep: Vec<SleepSession>,
}

impl DailyRecords {
    pub fn record_count(&self) -> usize {
        self.steps.len()
            + self.heart_rate.len()
            + self.total_calories.len()
            + self.distance.len()
            + self.active_calories.len()
            + self.sleep.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Session,
    Stage(SleepStageType),
}

/// A sleep span whose end precedes its start. It contributes zero minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedSpan {
    pub kind: SpanKind,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub aggregate: DailyAggregate,
    pub malformed: Vec<MalformedSpan>,
}

/// Reduce one day of records to the summary that gets displayed and uploaded.
///
/// Pure: the result depends only on `records`.
pub fn aggregate(records: &DailyRecords) -> Aggregation {
    let mut malformed = Vec::new();
    let sleep = sleep_totals(&records.sleep, &mut malformed);

    let aggregate = DailyAggregate {
        step_counts: records.steps.iter().map(|r| r.count).collect(),
        heart_rate_samples: records.heart_rate.iter().map(first_sample).collect(),
        total_calories_kcal: records.total_calories.iter().map(|r| r.energy_kcal).sum(),
        distance_meters: records.distance.iter().map(|r| r.distance_meters).sum(),
        active_calories_kcal: records.active_calories.iter().map(|r| r.energy_kcal).sum(),
        total_sleep_minutes: sleep.total,
        deep_sleep_minutes: sleep.deep,
        rem_sleep_minutes: sleep.rem,
        light_sleep_minutes: sleep.light,
    };

    Aggregation {
        aggregate,
        malformed,
    }
}

fn first_sample(record: &HeartRateRecord) -> HeartRatePoint {
    match record.samples.first() {
        Some(sample) => HeartRatePoint {
            bpm: f64::from(sample.beats_per_minute),
            time: sample.time.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        },
        None => HeartRatePoint::missing(),
    }
}

#[derive(Debug, Default)]
struct SleepTotals {
    total: u64,
    deep: u64,
    rem: u64,
    light: u64,
}

fn sleep_totals(sessions: &[SleepSession], malformed: &mut Vec<MalformedSpan>) -> SleepTotals {
    let mut totals = SleepTotals::default();
    let mut total_millis: i64 = 0;

    for session in sessions {
        total_millis += span_millis(
            SpanKind::Session,
            session.start_time,
            session.end_time,
            malformed,
        );

        for stage in &session.stages {
            let millis = span_millis(
                SpanKind::Stage(stage.stage),
                stage.start_time,
                stage.end_time,
                malformed,
            );
            let minutes = (millis / MILLIS_PER_MINUTE) as u64;

            match stage.stage {
                SleepStageType::Rem => totals.rem += minutes,
                SleepStageType::Deep => totals.deep += minutes,
                SleepStageType::Light => totals.light += minutes,
                _ => {}
            }
        }
    }

    // Session minutes are floored once over the summed duration, stages per stage.
    totals.total = (total_millis / MILLIS_PER_MINUTE) as u64;
    totals
}

fn span_millis(
    kind: SpanKind,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    malformed: &mut Vec<MalformedSpan>,
) -> i64 {
    let millis = (end - start).num_milliseconds();
    if millis < 0 {
        malformed.push(MalformedSpan { kind, start, end });
        return 0;
    }
    millis
}

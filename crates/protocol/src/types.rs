use serde::{Deserialize, Serialize};

/// Time string used for a heart-rate record that carried no samples.
pub const MISSING_SAMPLE_TIME: &str = "null";

/// First heart-rate sample of one provider record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRatePoint {
    pub bpm: f64,
    pub time: String,
}

impl HeartRatePoint {
    /// Placeholder for a record with no samples.
    pub fn missing() -> Self {
        Self {
            bpm: 0.0,
            time: MISSING_SAMPLE_TIME.to_string(),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.time == MISSING_SAMPLE_TIME
    }
}

/// Summary of one day of health records, recomputed on every sync.
///
/// This is both the upload body and the value rendered on screen. The default
/// value is the zero aggregate: empty sequences, zero sums and zero minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DailyAggregate {
    /// Raw per-record step counts in provider order. Not summed.
    pub step_counts: Vec<u64>,
    pub heart_rate_samples: Vec<HeartRatePoint>,
    pub total_calories_kcal: f64,
    pub distance_meters: f64,
    pub active_calories_kcal: f64,
    pub total_sleep_minutes: u64,
    pub deep_sleep_minutes: u64,
    pub rem_sleep_minutes: u64,
    pub light_sleep_minutes: u64,
}

impl DailyAggregate {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Step counts joined for display, e.g. `"500, 800"`.
    pub fn steps_display(&self) -> String {
        self.step_counts
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Most recent heart-rate reading that actually carried a sample.
    pub fn latest_heart_rate(&self) -> Option<&HeartRatePoint> {
        self.heart_rate_samples
            .iter()
            .rev()
            .find(|p| !p.is_missing())
    }

    /// Format a minute count as `"7h 5m"` or `"45m"`.
    pub fn format_minutes(total_mins: u64) -> String {
        let hours = total_mins / 60;
        let mins = total_mins % 60;
        if hours > 0 {
            format!("{}h {}m", hours, mins)
        } else {
            format!("{}m", mins)
        }
    }
}

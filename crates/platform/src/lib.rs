//! Health record access for vitals.
//!
//! This crate defines the record types a health data store hands out, the
//! provider contract used to request read permissions and query one record
//! type over a time window, and two providers:
//!
//! - [`MemoryStore`] - records held in memory, for tests and embedders
//! - [`ExportStore`] - a JSON health export on disk, re-read on every query
//!
//! # Example
//!
//! ```ignore
//! use vitals_platform::{ExportStore, HealthProvider, RecordType, StepRecord, TimeRange};
//!
//! let store = ExportStore::new("health-export.json");
//! let granted = store.request_permissions(&RecordType::ALL).await?;
//! let steps: Vec<StepRecord> = store.read(TimeRange::today(&chrono::Local::now())).await?;
//! ```

mod export;
mod memory;
mod provider;
mod records;
mod types;

pub use export::{ExportDocument, ExportStore};
pub use memory::MemoryStore;
pub use provider::{missing_scopes, HealthProvider, ProviderError};
pub use records::{
    ActiveCaloriesRecord, DistanceRecord, HealthRecord, HeartRateRecord, HeartRateSample,
    RecordSet, SleepSession, SleepStage, StepRecord, TotalCaloriesRecord,
};
pub use types::{RecordType, SleepStageType, TimeRange};

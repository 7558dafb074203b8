use std::sync::Arc;

use chrono::{DateTime, Local};
use vitals_protocol::DailyAggregate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    /// Waiting on provider queries or the upload.
    Requesting,
}

impl SyncPhase {
    pub fn label(&self) -> &'static str {
        match self {
            SyncPhase::Idle => "idle",
            SyncPhase::Requesting => "syncing",
        }
    }
}

/// Observable sync state handed to the presentation layer.
///
/// `aggregate` and `completed_at` only ever change together, on a successful
/// computation. Failures leave the previous aggregate in place.
#[derive(Debug, Clone, Default)]
pub struct SyncState {
    pub phase: SyncPhase,
    pub aggregate: Option<Arc<DailyAggregate>>,
    pub completed_at: Option<DateTime<Local>>,
}

impl SyncState {
    pub fn is_syncing(&self) -> bool {
        self.phase == SyncPhase::Requesting
    }
}

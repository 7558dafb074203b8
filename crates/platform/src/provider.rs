//! Health data provider contract.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::records::HealthRecord;
use crate::types::{RecordType, TimeRange};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Health data unavailable: {0}")]
    Unavailable(String),

    #[error("Read of {0} records not permitted")]
    NotPermitted(RecordType),

    #[error("Failed to read health export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed health export: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A read-only source of timestamped health records.
#[async_trait]
pub trait HealthProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Ask for read access to `scopes`. Returns the subset that was granted.
    async fn request_permissions(
        &self,
        scopes: &[RecordType],
    ) -> Result<BTreeSet<RecordType>, ProviderError>;

    /// Records of type `R` whose `[start_time, end_time)` interval overlaps `range`,
    /// in stored order. Zero-length records match when their start lies in `range`.
    async fn read<R: HealthRecord>(&self, range: TimeRange) -> Result<Vec<R>, ProviderError>;
}

/// Scopes in `required` that are absent from `granted`.
pub fn missing_scopes(required: &[RecordType], granted: &BTreeSet<RecordType>) -> Vec<RecordType> {
    required
        .iter()
        .filter(|scope| !granted.contains(scope))
        .copied()
        .collect()
}

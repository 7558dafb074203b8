//! In-memory provider.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::provider::{HealthProvider, ProviderError};
use crate::records::{HealthRecord, RecordSet};
use crate::types::{RecordType, TimeRange};

/// Provider backed by a fixed [`RecordSet`].
///
/// Every scope is granted unless narrowed with [`MemoryStore::with_granted`].
#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: RecordSet,
    granted: BTreeSet<RecordType>,
}

impl MemoryStore {
    pub fn new(records: RecordSet) -> Self {
        Self {
            records,
            granted: RecordType::ALL.into_iter().collect(),
        }
    }

    pub fn with_granted(mut self, granted: impl IntoIterator<Item = RecordType>) -> Self {
        self.granted = granted.into_iter().collect();
        self
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(RecordSet::default())
    }
}

#[async_trait]
impl HealthProvider for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn request_permissions(
        &self,
        scopes: &[RecordType],
    ) -> Result<BTreeSet<RecordType>, ProviderError> {
        Ok(scopes
            .iter()
            .filter(|s| self.granted.contains(s))
            .copied()
            .collect())
    }

    async fn read<R: HealthRecord>(&self, range: TimeRange) -> Result<Vec<R>, ProviderError> {
        if !self.granted.contains(&R::TYPE) {
            return Err(ProviderError::NotPermitted(R::TYPE));
        }
        Ok(R::in_range(&self.records, &range))
    }
}

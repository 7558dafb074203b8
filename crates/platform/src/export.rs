//! Provider reading a JSON health export from disk.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::provider::{HealthProvider, ProviderError};
use crate::records::{HealthRecord, RecordSet};
use crate::types::{RecordType, TimeRange};

/// On-disk export document.
///
/// ```json
/// {
///   "granted_scopes": ["steps", "heart_rate"],
///   "steps": [{ "start_time": "...", "end_time": "...", "count": 500 }],
///   "sleep_sessions": []
/// }
/// ```
///
/// Missing lists are empty. A missing `granted_scopes` grants every scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_scopes: Option<Vec<RecordType>>,
    #[serde(flatten)]
    pub records: RecordSet,
}

impl ExportDocument {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn is_granted(&self, scope: RecordType) -> bool {
        match &self.granted_scopes {
            Some(granted) => granted.contains(&scope),
            None => true,
        }
    }
}

/// Provider that re-reads its export file on every call, so each sync sees
/// whatever the exporter last wrote.
#[derive(Debug, Clone)]
pub struct ExportStore {
    path: PathBuf,
}

impl ExportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<ExportDocument, ProviderError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProviderError::Unavailable(format!(
                    "no health export at {}",
                    self.path.display()
                )));
            }
            Err(e) => return Err(ProviderError::Io(e)),
        };

        let document = ExportDocument::from_json(&content)?;
        debug!(
            path = %self.path.display(),
            records = document.records.len(),
            "Loaded health export"
        );
        Ok(document)
    }
}

#[async_trait]
impl HealthProvider for ExportStore {
    fn name(&self) -> &str {
        "export"
    }

    async fn request_permissions(
        &self,
        scopes: &[RecordType],
    ) -> Result<BTreeSet<RecordType>, ProviderError> {
        let document = self.load().await?;
        Ok(scopes
            .iter()
            .filter(|s| document.is_granted(**s))
            .copied()
            .collect())
    }

    async fn read<R: HealthRecord>(&self, range: TimeRange) -> Result<Vec<R>, ProviderError> {
        let document = self.load().await?;
        if !document.is_granted(R::TYPE) {
            return Err(ProviderError::NotPermitted(R::TYPE));
        }
        Ok(R::in_range(&document.records, &range))
    }
}

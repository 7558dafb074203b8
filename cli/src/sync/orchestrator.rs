use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Local;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use vitals_platform::{
    missing_scopes, ActiveCaloriesRecord, DistanceRecord, HealthProvider, HealthRecord,
    HeartRateRecord, ProviderError, RecordType, SleepSession, StepRecord, TimeRange,
    TotalCaloriesRecord,
};
use vitals_protocol::DailyAggregate;

use crate::backend::{AggregateSink, TransportError};
use crate::data::{self, Aggregation, DailyRecords};

use super::cancel::CancellationToken;
use super::state::{SyncPhase, SyncState};

/// Fixed log target for every sync outcome.
pub const LOG_TARGET: &str = "health_sync";

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Read permission denied for: {}", scope_list(.missing))]
    PermissionDenied { missing: Vec<RecordType> },

    #[error("Permission request failed: {0}")]
    PermissionRequest(#[source] ProviderError),

    #[error("Failed to read {record_type} records: {source}")]
    Provider {
        record_type: RecordType,
        source: ProviderError,
    },

    #[error("Upload failed: {0}")]
    Transport(#[from] TransportError),

    #[error("Sync cancelled")]
    Cancelled,

    #[error("A sync is already in progress")]
    AlreadyRunning,

    #[error("Sync task aborted: {0}")]
    Aborted(String),
}

fn scope_list(scopes: &[RecordType]) -> String {
    scopes
        .iter()
        .map(|s| s.label())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, SyncError>;

/// State shared by the orchestrator and every task it spawns.
#[derive(Debug)]
struct SyncCell {
    state: watch::Sender<SyncState>,
    in_flight: AtomicBool,
}

/// Held by a running sync. Dropping it (on completion, cancellation or panic)
/// frees the single-flight slot and returns the phase to idle.
struct InFlightGuard {
    cell: Arc<SyncCell>,
}

impl InFlightGuard {
    fn acquire(cell: &Arc<SyncCell>) -> Option<Self> {
        cell.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                cell: Arc::clone(cell),
            })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.cell.state.send_if_modified(|state| {
            let was_requesting = state.phase != SyncPhase::Idle;
            state.phase = SyncPhase::Idle;
            was_requesting
        });
        self.cell.in_flight.store(false, Ordering::Release);
    }
}

/// A running sync.
pub struct SyncHandle {
    token: CancellationToken,
    join: JoinHandle<Result<DailyAggregate>>,
}

impl SyncHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    pub async fn outcome(self) -> Result<DailyAggregate> {
        match self.join.await {
            Ok(result) => result,
            Err(e) => Err(SyncError::Aborted(e.to_string())),
        }
    }
}

struct Pipeline<P, S> {
    provider: P,
    sink: S,
    cell: Arc<SyncCell>,
}

/// Runs one sync at a time: permission check, six reads for today, aggregation,
/// publication, upload.
pub struct SyncOrchestrator<P, S> {
    pipeline: Arc<Pipeline<P, S>>,
    runtime: Handle,
}

impl<P, S> SyncOrchestrator<P, S>
where
    P: HealthProvider + 'static,
    S: AggregateSink + 'static,
{
    pub fn new(provider: P, sink: S, runtime: Handle) -> Self {
        let (state, _) = watch::channel(SyncState::default());
        let cell = Arc::new(SyncCell {
            state,
            in_flight: AtomicBool::new(false),
        });

        Self {
            pipeline: Arc::new(Pipeline {
                provider,
                sink,
                cell,
            }),
            runtime,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncState> {
        self.pipeline.cell.state.subscribe()
    }

    pub fn state(&self) -> SyncState {
        self.pipeline.cell.state.borrow().clone()
    }

    pub fn provider(&self) -> &P {
        &self.pipeline.provider
    }

    pub fn is_running(&self) -> bool {
        self.pipeline.cell.in_flight.load(Ordering::Acquire)
    }

    /// Starts a sync unless one is already in flight.
    ///
    /// The returned handle resolves to the computed aggregate; every failure is
    /// also logged under [`LOG_TARGET`] from inside the task.
    pub fn trigger(&self) -> Result<SyncHandle> {
        let Some(guard) = InFlightGuard::acquire(&self.pipeline.cell) else {
            warn!(target: LOG_TARGET, "Sync requested while another is in flight");
            return Err(SyncError::AlreadyRunning);
        };

        let token = CancellationToken::new();
        let task_token = token.clone();
        let pipeline = Arc::clone(&self.pipeline);

        let join = self.runtime.spawn(async move {
            let _guard = guard;
            let result = pipeline.run(&task_token).await;
            if let Err(e) = &result {
                error!(target: LOG_TARGET, error = %e, "Sync failed");
            }
            result
        });

        Ok(SyncHandle { token, join })
    }
}

impl<P, S> Pipeline<P, S>
where
    P: HealthProvider,
    S: AggregateSink,
{
    async fn run(&self, token: &CancellationToken) -> Result<DailyAggregate> {
        let granted = token
            .run_until_cancelled(self.provider.request_permissions(&RecordType::ALL))
            .await
            .ok_or(SyncError::Cancelled)?
            .map_err(SyncError::PermissionRequest)?;

        let missing = missing_scopes(&RecordType::ALL, &granted);
        if !missing.is_empty() {
            return Err(SyncError::PermissionDenied { missing });
        }

        self.cell
            .state
            .send_modify(|state| state.phase = SyncPhase::Requesting);

        let range = TimeRange::today(&Local::now());
        info!(
            target: LOG_TARGET,
            provider = self.provider.name(),
            start = %range.start,
            end = %range.end,
            "Sync started"
        );

        let records = DailyRecords {
            steps: self.read::<StepRecord>(range, token).await?,
            heart_rate: self.read::<HeartRateRecord>(range, token).await?,
            total_calories: self.read::<TotalCaloriesRecord>(range, token).await?,
            distance: self.read::<DistanceRecord>(range, token).await?,
            active_calories: self.read::<ActiveCaloriesRecord>(range, token).await?,
            sleep: self.read::<SleepSession>(range, token).await?,
        };

        let Aggregation {
            aggregate,
            malformed,
        } = data::aggregate(&records);

        for span in &malformed {
            warn!(
                target: LOG_TARGET,
                kind = ?span.kind,
                start = %span.start,
                end = %span.end,
                "Sleep span ends before it starts; counted as zero"
            );
        }

        debug!(
            target: LOG_TARGET,
            records = records.record_count(),
            steps = %aggregate.steps_display(),
            heart_rate_records = aggregate.heart_rate_samples.len(),
            total_kcal = aggregate.total_calories_kcal,
            distance_m = aggregate.distance_meters,
            active_kcal = aggregate.active_calories_kcal,
            sleep_mins = aggregate.total_sleep_minutes,
            deep_mins = aggregate.deep_sleep_minutes,
            rem_mins = aggregate.rem_sleep_minutes,
            light_mins = aggregate.light_sleep_minutes,
            "Aggregated daily records"
        );

        let aggregate = Arc::new(aggregate);
        self.cell.state.send_modify(|state| {
            state.aggregate = Some(Arc::clone(&aggregate));
            state.completed_at = Some(Local::now());
        });

        token
            .run_until_cancelled(self.sink.submit(&aggregate))
            .await
            .ok_or(SyncError::Cancelled)??;

        info!(target: LOG_TARGET, "Daily aggregate uploaded");
        Ok(Arc::unwrap_or_clone(aggregate))
    }

    async fn read<R: HealthRecord>(
        &self,
        range: TimeRange,
        token: &CancellationToken,
    ) -> Result<Vec<R>> {
        let records = token
            .run_until_cancelled(self.provider.read::<R>(range))
            .await
            .ok_or(SyncError::Cancelled)?
            .map_err(|source| SyncError::Provider {
                record_type: R::TYPE,
                source,
            })?;

        debug!(
            target: LOG_TARGET,
            record_type = %R::TYPE,
            count = records.len(),
            "Read records"
        );
        Ok(records)
    }
}

mod cancel;
mod orchestrator;
mod state;

pub use orchestrator::{SyncError, SyncHandle, SyncOrchestrator, LOG_TARGET};
pub use state::{SyncPhase, SyncState};

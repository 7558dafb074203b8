//! Application core module.
//!
//! Holds the screen state for the TUI and the handle to the sync pipeline.

mod actions;
mod tui;
pub mod types;

pub use tui::run_tui;

use chrono::{DateTime, Local};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info};
use vitals_platform::ExportStore;

use crate::backend::BackendClient;
use crate::config::{RuntimeConfig, UserConfig};
use crate::sync::{SyncHandle, SyncOrchestrator, SyncState};
use crate::theme::ThemeColors;

pub use types::{Action, AppView};

pub type Orchestrator = SyncOrchestrator<ExportStore, BackendClient>;

/// Build the production pipeline: export file in, backend out.
pub fn build_orchestrator(config: &UserConfig, runtime: Handle) -> Orchestrator {
    let provider = ExportStore::new(config.provider.export_path.clone());
    let sink = BackendClient::new(&config.backend.base_url, config.backend.timeout());
    SyncOrchestrator::new(provider, sink, runtime)
}

/// Main application state for the TUI.
///
/// The displayed aggregate is a snapshot of the orchestrator's published state,
/// refreshed on every tick.
pub struct App {
    pub config: RuntimeConfig,
    pub view: AppView,
    pub sync: SyncState,
    pub refresh_ms: u64,
    pub(crate) orchestrator: Orchestrator,
    updates: watch::Receiver<SyncState>,
    pub(crate) running: Option<SyncHandle>,
    /// Whole seconds since the last sync as last drawn in the status bar.
    shown_age: Option<i64>,
}

impl App {
    pub fn new(user_config: UserConfig, runtime: Handle) -> Self {
        let orchestrator = build_orchestrator(&user_config, runtime);
        info!(
            export = %orchestrator.provider().path().display(),
            refresh_ms = user_config.refresh_ms,
            "Initializing app"
        );

        let updates = orchestrator.subscribe();
        let sync = updates.borrow().clone();

        Self {
            refresh_ms: user_config.refresh_ms,
            config: RuntimeConfig::new(user_config),
            view: AppView::Main,
            sync,
            orchestrator,
            updates,
            running: None,
            shown_age: None,
        }
    }

    /// Pull the latest published state. Returns `true` if the UI should be redrawn.
    pub fn tick(&mut self) -> bool {
        if self.running.as_ref().is_some_and(SyncHandle::is_finished) {
            self.running = None;
        }

        let state_changed = match self.updates.has_changed() {
            Ok(true) => {
                self.sync = self.updates.borrow_and_update().clone();
                debug!(phase = self.sync.phase.label(), "Sync state changed");
                true
            }
            _ => false,
        };

        self.age_changed(Local::now()) || state_changed
    }

    /// Whether the "updated ... ago" text differs from what was last drawn.
    fn age_changed(&mut self, now: DateTime<Local>) -> bool {
        let age = self
            .sync
            .completed_at
            .map(|at| (now - at).num_seconds().max(0));
        let changed = age != self.shown_age;
        self.shown_age = age;
        changed
    }

    pub fn current_theme(&self) -> ThemeColors {
        self.config.theme()
    }

    pub fn export_path(&self) -> String {
        self.orchestrator.provider().path().display().to_string()
    }

    pub fn cleanup(&mut self) {
        if let Some(handle) = self.running.take() {
            info!("Cancelling in-flight sync on exit");
            handle.cancel();
        }
    }
}

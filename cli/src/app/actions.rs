//! Action handling for App.

use tracing::{debug, info, warn};

use crate::sync::{SyncError, LOG_TARGET};

use super::types::{Action, AppView};
use super::App;

impl App {
    /// Returns `false` if the application should quit, `true` otherwise.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::None => {}
            Action::ToggleHelp => {
                self.view = match self.view {
                    AppView::Help => AppView::Main,
                    AppView::Main => AppView::Help,
                };
            }
            Action::CycleAppearance => {
                self.config.cycle_appearance();
                info!(appearance = self.config.appearance_label(), "Appearance changed");
            }
            Action::Sync => self.start_sync(),
            Action::CancelSync => self.cancel_sync(),
        }
        true
    }

    fn start_sync(&mut self) {
        if self.orchestrator.is_running() {
            debug!(target: LOG_TARGET, "Ignoring sync request, one is already running");
            return;
        }

        match self.orchestrator.trigger() {
            Ok(handle) => {
                info!(target: LOG_TARGET, "Sync requested");
                self.running = Some(handle);
            }
            Err(SyncError::AlreadyRunning) => {
                debug!(target: LOG_TARGET, "Ignoring sync request, one is already running");
            }
            Err(e) => warn!(target: LOG_TARGET, error = %e, "Could not start sync"),
        }
    }

    fn cancel_sync(&mut self) {
        if let Some(handle) = &self.running {
            info!(target: LOG_TARGET, "Cancelling sync");
            handle.cancel();
        }
    }
}

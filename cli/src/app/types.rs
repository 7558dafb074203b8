//! Core types for the TUI application.

/// Actions that can be performed in the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Sync,
    CancelSync,
    ToggleHelp,
    CycleAppearance,
    None,
}

/// Current view/screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    #[default]
    Main,
    Help,
}

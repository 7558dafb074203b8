use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Action, App, AppView};

pub mod keys {
    pub const SYNC: &str = "Enter/s";
    pub const CANCEL: &str = "c";
    pub const HELP: &str = "?";
    pub const APPEARANCE: &str = "a";
    pub const QUIT: &str = "q/Esc";
}

pub fn handle_key(app: &App, key: KeyEvent) -> Action {
    action_for(app.view, key)
}

fn action_for(view: AppView, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match view {
        AppView::Main => handle_main_keys(key),
        AppView::Help => handle_help_keys(key),
    }
}

fn handle_main_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Enter | KeyCode::Char('s') => Action::Sync,
        KeyCode::Char('c') => Action::CancelSync,
        KeyCode::Char('?') | KeyCode::Char('/') => Action::ToggleHelp,
        KeyCode::Char('a') => Action::CycleAppearance,
        _ => Action::None,
    }
}

fn handle_help_keys(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('/') | KeyCode::Char('q') => {
            Action::ToggleHelp
        }
        _ => Action::None,
    }
}

pub struct KeyBinding {
    pub key: &'static str,
    pub description: &'static str,
}

pub const KEY_BINDINGS: &[KeyBinding] = &[
    KeyBinding {
        key: keys::SYNC,
        description: "Request permissions and sync today's data",
    },
    KeyBinding {
        key: keys::CANCEL,
        description: "Cancel the running sync",
    },
    KeyBinding {
        key: keys::APPEARANCE,
        description: "Cycle appearance (auto/dark/light)",
    },
    KeyBinding {
        key: keys::HELP,
        description: "Toggle this help",
    },
    KeyBinding {
        key: keys::QUIT,
        description: "Quit",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_and_s_start_a_sync() {
        assert_eq!(action_for(AppView::Main, press(KeyCode::Enter)), Action::Sync);
        assert_eq!(
            action_for(AppView::Main, press(KeyCode::Char('s'))),
            Action::Sync
        );
    }

    #[test]
    fn ctrl_c_quits_from_any_view() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(AppView::Main, ctrl_c), Action::Quit);
        assert_eq!(action_for(AppView::Help, ctrl_c), Action::Quit);
    }

    #[test]
    fn plain_c_cancels() {
        assert_eq!(
            action_for(AppView::Main, press(KeyCode::Char('c'))),
            Action::CancelSync
        );
    }

    #[test]
    fn q_and_esc_quit_from_main() {
        assert_eq!(action_for(AppView::Main, press(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(action_for(AppView::Main, press(KeyCode::Esc)), Action::Quit);
    }

    #[test]
    fn help_lists_cancel_and_quit() {
        let listed: Vec<&str> = KEY_BINDINGS.iter().map(|b| b.key).collect();
        for key in [keys::SYNC, keys::CANCEL, keys::APPEARANCE, keys::HELP, keys::QUIT] {
            assert!(listed.contains(&key), "{key} missing from help");
        }
    }

    #[test]
    fn help_view_swallows_sync_keys() {
        assert_eq!(action_for(AppView::Help, press(KeyCode::Enter)), Action::None);
        assert_eq!(
            action_for(AppView::Help, press(KeyCode::Esc)),
            Action::ToggleHelp
        );
    }
}

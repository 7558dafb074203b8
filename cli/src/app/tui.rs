//! TUI runtime loop.

use std::io;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::runtime::Handle;
use tracing::debug;

use crate::config::UserConfig;
use crate::input;
use crate::ui;

use super::App;

/// Enables raw mode and switches to the alternate screen buffer.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Runs the TUI until the user quits. Syncs run on `runtime`; this thread only
/// draws and reads keys.
pub fn run_tui(user_config: UserConfig, runtime: Handle) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_tui_loop(&mut terminal, user_config, runtime);
    restore_terminal(&mut terminal)?;
    result
}

fn run_tui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    user_config: UserConfig,
    runtime: Handle,
) -> Result<()> {
    let mut app = App::new(user_config, runtime);
    let poll_timeout = Duration::from_millis(app.refresh_ms.max(16));
    let mut needs_redraw = true;

    loop {
        needs_redraw |= app.tick();

        if needs_redraw {
            terminal.draw(|frame| ui::render(frame, &app))?;
            needs_redraw = false;
        }

        if event::poll(poll_timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = input::handle_key(&app, key);
                    debug!(?action, "Key action");
                    if !app.handle_action(action) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
    }

    app.cleanup();
    Ok(())
}

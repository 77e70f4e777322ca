mod app;
mod config;
mod logging;
mod storage;

use crate::app::handlers::{handle_key, handle_mouse};
use crate::app::view::draw_ui;
use crate::app::AppState;
use crate::config::{Config, USAGE};
use crate::storage::LocalStore;
use crossterm::cursor::Show;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::info;

const TICK: Duration = Duration::from_millis(50);

#[derive(Clone, Copy, Debug)]
struct KeyDebugLog {
    code: KeyCode,
    modifiers: KeyModifiers,
    kind: KeyEventKind,
}

impl KeyDebugLog {
    fn from_event(event: &crossterm::event::KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
            kind: event.kind,
        }
    }
}

impl fmt::Display for KeyDebugLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "code={:?} mods={:?} kind={:?}",
            self.code, self.modifiers, self.kind
        )
    }
}

struct TerminalRestoreGuard;

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
        let _ = stdout.execute(Show);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    if config.show_help {
        println!("{USAGE}");
        return Ok(());
    }
    let log_path = logging::init_file_logging(&config.data_dir)?;
    info!(
        data_dir = %config.data_dir.display(),
        log = %log_path.display(),
        "starting ani-note"
    );

    let store = LocalStore::open_or_reset(config.store_path())?;
    let mut app = AppState::load(store);
    app.ensure_welcome_note();

    let result = run(&mut app, config.debug_keys);
    info!("exiting");
    result
}

fn run(app: &mut AppState, debug_keys: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout();
    let _restore_guard = TerminalRestoreGuard;
    enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    let _ = stdout.execute(EnableMouseCapture);
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let mut needs_redraw = true;
    let mut was_animating = false;
    loop {
        let now = Instant::now();
        let generation = app.dialogs.generation();
        let pending = app.dialogs.pending_tasks();
        app.tick(now);
        if app.dialogs.generation() != generation || app.dialogs.pending_tasks() != pending {
            needs_redraw = true;
        }
        // One extra frame after effects end so their styling is cleared.
        let animating = app.animations.is_running(now);
        if animating || was_animating {
            needs_redraw = true;
        }
        was_animating = animating;

        if app.should_quit {
            break;
        }
        if needs_redraw {
            terminal.draw(|f| draw_ui(f, app, now))?;
            needs_redraw = false;
        }

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if debug_keys {
                        info!("key: {}", KeyDebugLog::from_event(&key));
                    }
                    handle_key(app, key.code, key.modifiers, Instant::now());
                    needs_redraw = true;
                }
                Event::Mouse(mouse) => {
                    if handle_mouse(app, mouse.kind) {
                        needs_redraw = true;
                    }
                }
                Event::Resize(_, _) => needs_redraw = true,
                _ => {}
            }
        }
    }
    Ok(())
}

//! pathdex: a terminal editor for a CSV index of files, built with ratatui.
//!
//! This binary loads the configuration and the index, runs the main event
//! loop, and restores the terminal on exit or panic.

mod app;
mod input;
mod render;
mod ui;

use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste, EnableFocusChange,
        Event, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use pathdex_core::config::keymap::Keymap;
use pathdex_core::config::settings::Config;
use pathdex_core::config::{find_config, keymap_path_for};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{App, AppMode, IndexPaths};
use crate::input::{handle_key, InputAction};
use crate::render::render;

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableBracketedPaste,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableFocusChange, LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Loads the config (defaults when none is found) and its sibling keymap.
fn load_settings(cwd: &Path) -> anyhow::Result<(Config, Keymap)> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let Some(config_path) = find_config(cwd, home.as_deref()) else {
        return Ok((Config::default(), Keymap::default()));
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let keymap_path = keymap_path_for(&config_path);
    let keymap = if keymap_path.is_file() {
        Keymap::load(&keymap_path)
            .with_context(|| format!("failed to load {}", keymap_path.display()))?
    } else {
        Keymap::default()
    };
    Ok((config, keymap))
}

fn init_logging(config: &Config) -> anyhow::Result<()> {
    // Logs go to a file so they never draw over the UI.
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log.file)
        .with_context(|| format!("failed to open log file {}", config.log.file.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_max_level(config.log.level_filter())
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let (config, keymap) = load_settings(&cwd)?;
    init_logging(&config)?;

    let index_override = std::env::args().nth(1).map(PathBuf::from);
    let paths = IndexPaths::from_config(&config, &cwd, index_override);
    let app = App::open(paths, &config, keymap)?;

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, app);

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        if app.should_quit() {
            tracing::info!("quitting");
            break;
        }

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        app = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = handle_key(key, app.mode(), app.keymap());
                app.handle_input(action)
            }
            Event::Paste(text) if matches!(app.mode(), AppMode::Editing) => {
                app.handle_input(InputAction::DraftPaste(text))
            }
            Event::FocusLost => app.handle_focus_lost(),
            _ => app,
        };
    }
    Ok(())
}

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use journal_config::{Config, ConfigStore};
use journal_engine::{FileStorage, Journal, io};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{env, fs::OpenOptions, io::stdout, path::PathBuf, process};

mod app;
mod ui;

use app::App;

/// Log to a file next to the config; stderr would scribble over the TUI.
fn init_logging() {
    let log_dir = Config::config_dir();
    let log_file = std::fs::create_dir_all(&log_dir).and_then(|()| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join("journal-cli.log"))
    });

    match log_file {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("Warning: logging disabled, cannot open log file: {e}"),
    }
}

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let mut settings = ConfigStore::default();

    let journal = match args.len() {
        // No argument - reopen the remembered directory, if any
        1 => Journal::startup(FileStorage, &settings),
        2 => {
            let directory = PathBuf::from(&args[1]);
            if let Err(e) = io::validate_journal_dir(&directory) {
                eprintln!("Error: Journal path '{}' is invalid: {e}", directory.display());
                process::exit(1);
            }
            let mut journal = Journal::new(FileStorage);
            journal.choose_directory(directory, &mut settings);
            journal
        }
        _ => {
            eprintln!("Usage: {} [journal-directory]", args[0]);
            process::exit(1);
        }
    };
    log::info!("journal-cli starting, config at {}", settings.path().display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(journal, settings);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        // Don't lose the buffer just because the event loop failed
        if let Err(e) = app.journal.close() {
            eprintln!("Error: failed to save current entry: {e}");
        }
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
    }
    Ok(())
}

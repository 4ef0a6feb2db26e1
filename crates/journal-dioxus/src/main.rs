use dioxus::prelude::*;
use journal_config::Config;
use journal_engine::io;
use std::env;
use std::path::PathBuf;
use std::process;

mod ui;

use ui::App;

/// Journal directory given on the command line, if any
fn directory_argument() -> Option<PathBuf> {
    env::args().nth(1).map(PathBuf::from)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("journal starting up");
    log::info!("Config path: {}", Config::config_path().display());

    if env::args().count() > 2 {
        let program_name = env::args()
            .next()
            .unwrap_or_else(|| "journal-dioxus".to_string());
        eprintln!("Usage: {program_name} [journal-directory]");
        process::exit(1);
    }

    if let Some(directory) = directory_argument()
        && let Err(e) = io::validate_journal_dir(&directory)
    {
        eprintln!(
            "Error: Journal path '{}' is invalid: {e}",
            directory.display()
        );
        process::exit(1);
    }

    dioxus::LaunchBuilder::desktop()
        .with_cfg(make_window_config())
        .launch(app_root);
}

fn app_root() -> Element {
    let initial_directory = directory_argument();
    log::info!(
        "app_root() using directory {:?}",
        initial_directory.as_deref()
    );

    rsx! {
        App {
            initial_directory,
            config_path: Config::config_path(),
        }
    }
}

fn make_window_config() -> dioxus::desktop::Config {
    use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

    let window = WindowBuilder::new()
        .with_title("Journal")
        .with_inner_size(LogicalSize::new(900.0, 600.0))
        .with_always_on_top(false);

    Config::default().with_window(window)
}

use dioxus::events::Key;
use dioxus::prelude::*;
use journal_config::ConfigStore;
use journal_engine::{Command, DirectorySettings, FileStorage, Journal};
use std::path::PathBuf;

use super::components::{EntryList, PreviewPane, StatusBar, Toolbar};

const JOURNAL_CSS: &str = include_str!("../assets/journal.css");

/// Build the journal for this run: an explicit directory wins over the
/// remembered one.
pub fn open_journal(
    initial_directory: Option<PathBuf>,
    settings: &mut dyn DirectorySettings,
) -> Journal<FileStorage> {
    match initial_directory {
        Some(directory) => {
            let mut journal = Journal::new(FileStorage);
            journal.choose_directory(directory, settings);
            journal
        }
        None => Journal::startup(FileStorage, settings),
    }
}

fn dispatch(
    journal: &mut Signal<Journal<FileStorage>>,
    settings: &mut Signal<ConfigStore>,
    command: Command,
) {
    let mut settings = settings.write();
    journal.write().handle(command, &mut *settings);
}

#[component]
pub fn App(initial_directory: Option<PathBuf>, config_path: PathBuf) -> Element {
    let mut settings = use_signal(|| ConfigStore::new(config_path.clone()));
    let mut journal = use_signal(|| {
        let mut store = ConfigStore::new(config_path.clone());
        open_journal(initial_directory.clone(), &mut store)
    });

    use_drop(move || {
        if let Ok(mut journal) = journal.try_write()
            && let Err(e) = journal.close()
        {
            log::error!("Failed to save on exit: {e}");
        }
    });

    let (directory, entries, active_index, buffer, notice, dirty) = {
        let journal = journal.read();
        (
            journal.directory().map(|dir| dir.to_path_buf()),
            journal.entries().iter().cloned().collect::<Vec<_>>(),
            journal.active().map(|active| active.index()),
            journal.buffer().to_string(),
            journal.notice().cloned(),
            journal.active().is_some_and(|active| active.is_dirty()),
        )
    };
    let has_entry = active_index.is_some();

    rsx! {
        style { {JOURNAL_CSS} }
        div {
            class: "app-container",
            tabindex: "0",
            onkeydown: move |event: Event<KeyboardData>| {
                let modifiers = event.modifiers();
                let is_save = matches!(event.key(), Key::Character(ref c) if c.eq_ignore_ascii_case("s"));
                if is_save && (modifiers.ctrl() || modifiers.meta()) {
                    event.prevent_default();
                    dispatch(&mut journal, &mut settings, Command::SaveRequested);
                }
            },
            Toolbar {
                directory: directory.clone(),
                on_open_folder: move |path: PathBuf| {
                    dispatch(&mut journal, &mut settings, Command::OpenFolderSelected(path));
                },
                on_new_entry: move |title: String| {
                    dispatch(&mut journal, &mut settings, Command::NewEntry(title));
                },
                on_save: move |_| {
                    dispatch(&mut journal, &mut settings, Command::SaveRequested);
                },
            }
            if directory.is_none() {
                div {
                    class: "welcome",
                    h1 { "Open a journal folder to begin" }
                }
            } else {
                div {
                    class: "split",
                    EntryList {
                        entries,
                        active_index,
                        on_select: move |index: usize| {
                            dispatch(&mut journal, &mut settings, Command::SelectEntry(index));
                        },
                    }
                    div {
                        class: "editor",
                        textarea {
                            name: "markdown_editor",
                            spellcheck: false,
                            disabled: !has_entry,
                            value: "{buffer}",
                            oninput: move |event: Event<FormData>| {
                                dispatch(&mut journal, &mut settings, Command::EditBuffer(event.value()));
                            },
                        }
                    }
                    PreviewPane { markdown: buffer.clone() }
                }
            }
            StatusBar { notice, dirty }
        }
    }
}

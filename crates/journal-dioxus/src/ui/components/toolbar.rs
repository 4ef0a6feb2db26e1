use dioxus::events::Key;
use dioxus::prelude::*;
use std::path::PathBuf;

/// Open-folder path field, new-entry title field and save button.
#[component]
pub fn Toolbar(
    directory: Option<PathBuf>,
    on_open_folder: EventHandler<PathBuf>,
    on_new_entry: EventHandler<String>,
    on_save: EventHandler<()>,
) -> Element {
    let mut folder_input = use_signal(|| {
        directory
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default()
    });
    let mut title_input = use_signal(String::new);
    let has_directory = directory.is_some();

    let submit_folder = move || {
        let path = folder_input.read().trim().to_string();
        if !path.is_empty() {
            on_open_folder.call(PathBuf::from(path));
        }
    };

    let mut submit_title = move || {
        let title = title_input.read().trim().to_string();
        if !title.is_empty() {
            on_new_entry.call(title);
            title_input.set(String::new());
        }
    };

    rsx! {
        div {
            class: "toolbar",
            input {
                class: "folder-input",
                r#type: "text",
                placeholder: "Journal folder path",
                value: "{folder_input}",
                oninput: move |evt| folder_input.set(evt.value()),
                onkeydown: move |evt: Event<KeyboardData>| {
                    if evt.key() == Key::Enter {
                        submit_folder();
                    }
                },
            }
            button {
                onclick: move |_| submit_folder(),
                "Open folder"
            }
            input {
                class: "title-input",
                r#type: "text",
                placeholder: "New entry title",
                disabled: !has_directory,
                value: "{title_input}",
                oninput: move |evt| title_input.set(evt.value()),
                onkeydown: move |evt: Event<KeyboardData>| {
                    if evt.key() == Key::Enter {
                        submit_title();
                    }
                },
            }
            button {
                disabled: !has_directory,
                onclick: move |_| submit_title(),
                "New entry"
            }
            button {
                disabled: !has_directory,
                onclick: move |_| on_save.call(()),
                "Save"
            }
        }
    }
}

use dioxus::prelude::*;
use journal_engine::EntryDescriptor;

/// Sidebar of entries, newest first, with the active one highlighted
#[component]
pub fn EntryList(
    entries: Vec<EntryDescriptor>,
    active_index: Option<usize>,
    on_select: EventHandler<usize>,
) -> Element {
    let rows: Vec<(usize, String, &'static str, String, String)> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let class = if active_index == Some(index) {
                "entry-button active"
            } else {
                "entry-button"
            };
            (
                index,
                entry.path().display().to_string(),
                class,
                entry.title().to_string(),
                entry.date().to_string(),
            )
        })
        .collect();

    rsx! {
        div {
            class: "entry-list",
            if rows.is_empty() {
                p { class: "empty", "No entries yet" }
            }
            for (index, key, class, title, date) in rows {
                button {
                    key: "{key}",
                    class: "{class}",
                    onclick: move |_| on_select.call(index),
                    p { class: "title", "{title}" }
                    p { class: "date", "{date}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;
    use std::path::Path;

    fn entry(name: &str) -> EntryDescriptor {
        EntryDescriptor::from_file_name(Path::new("/journal"), name).unwrap()
    }

    fn two_entries() -> Element {
        rsx! {
            EntryList {
                entries: vec![entry("B_03-01-2024.md"), entry("A_01-01-2024.md")],
                active_index: Some(1),
                on_select: |_| {},
            }
        }
    }

    fn no_entries() -> Element {
        rsx! {
            EntryList {
                entries: Vec::new(),
                active_index: None,
                on_select: |_| {},
            }
        }
    }

    #[test]
    fn test_entry_list_renders_titles_and_dates() {
        let mut dom = VirtualDom::new(two_entries);
        dom.rebuild_in_place();
        let html = render(&dom);

        assert!(html.contains("03-01-2024"));
        assert!(html.contains("01-01-2024"));
        let b = html.find(">B<").unwrap();
        let a = html.find(">A<").unwrap();
        assert!(b < a, "entries should keep their order");
        assert_eq!(html.matches("entry-button active").count(), 1);
    }

    #[test]
    fn test_entry_list_empty() {
        let mut dom = VirtualDom::new(no_entries);
        dom.rebuild_in_place();
        let html = render(&dom);

        assert!(html.contains("No entries yet"));
        assert!(!html.contains("entry-button"));
    }
}

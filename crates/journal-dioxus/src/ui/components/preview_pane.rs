use dioxus::prelude::*;
use journal_engine::preview;

/// Live HTML rendering of the editor buffer
#[component]
pub fn PreviewPane(markdown: String) -> Element {
    let html = preview::render_html(&markdown);

    rsx! {
        div {
            class: "preview",
            dangerous_inner_html: "{html}",
        }
    }
}

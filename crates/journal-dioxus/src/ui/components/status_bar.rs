use dioxus::prelude::*;
use journal_engine::{Notice, NoticeLevel};

#[component]
pub fn StatusBar(notice: Option<Notice>, dirty: bool) -> Element {
    let (class, message) = match &notice {
        Some(notice) => match notice.level {
            NoticeLevel::Info => ("status-bar info", notice.message.clone()),
            NoticeLevel::Error => ("status-bar error", notice.message.clone()),
        },
        None if dirty => ("status-bar", "Unsaved changes".to_string()),
        None => ("status-bar", "Ctrl+S to save".to_string()),
    };

    rsx! {
        div {
            class: "{class}",
            "{message}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dioxus::dioxus_core::VirtualDom;
    use dioxus_ssr::render;

    fn render_status(notice: Option<Notice>, dirty: bool) -> String {
        let mut dom = VirtualDom::new_with_props(StatusBar, StatusBarProps { notice, dirty });
        dom.rebuild_in_place();
        render(&dom)
    }

    #[test]
    fn test_status_bar_shows_error() {
        let html = render_status(Some(Notice::error("Cannot write entry /x: denied")), false);

        assert!(html.contains("status-bar error"));
        assert!(html.contains("Cannot write entry /x: denied"));
    }

    #[test]
    fn test_status_bar_shows_save_confirmation() {
        let html = render_status(Some(Notice::info("Saved A_01-01-2024.md")), false);

        assert!(html.contains("status-bar info"));
        assert!(html.contains("Saved A_01-01-2024.md"));
    }

    #[test]
    fn test_status_bar_flags_unsaved_changes() {
        let html = render_status(None, true);
        assert!(html.contains("Unsaved changes"));
    }
}

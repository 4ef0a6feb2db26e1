use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use journal_config::ConfigStore;
use journal_engine::{Command, FileStorage, Journal};
use ratatui::widgets::ListState;
use std::path::PathBuf;
use tui_textarea::TextArea;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    OpenFolder,
    NewEntry,
}

/// Single-line input shown in place of the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

impl Prompt {
    pub fn label(&self) -> &'static str {
        match self.kind {
            PromptKind::OpenFolder => "Open folder",
            PromptKind::NewEntry => "New entry title",
        }
    }
}

pub struct App {
    pub journal: Journal<FileStorage>,
    pub settings: ConfigStore,
    pub editor: TextArea<'static>,
    pub entry_list: ListState,
    pub focus: Focus,
    pub prompt: Option<Prompt>,
    pub should_quit: bool,
    /// Entry whose text is currently in `editor`
    loaded: Option<PathBuf>,
}

impl App {
    pub fn new(journal: Journal<FileStorage>, settings: ConfigStore) -> Self {
        let mut app = Self {
            journal,
            settings,
            editor: TextArea::default(),
            entry_list: ListState::default(),
            focus: Focus::Sidebar,
            prompt: None,
            should_quit: false,
            loaded: None,
        };
        app.sync_editor();
        app
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('q') => return self.quit(),
                KeyCode::Char('s') => return self.dispatch(Command::SaveRequested),
                KeyCode::Char('o') => return self.open_prompt(PromptKind::OpenFolder),
                KeyCode::Char('n') => return self.open_prompt(PromptKind::NewEntry),
                _ => {}
            }
        }

        match self.focus {
            Focus::Sidebar => self.handle_sidebar_key(key),
            Focus::Editor => self.handle_editor_key(key),
        }
    }

    fn handle_sidebar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Down | KeyCode::Char('j') => self.next_entry(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_entry(),
            KeyCode::Enter | KeyCode::Tab | KeyCode::Char('i') => {
                if self.journal.active().is_some() {
                    self.focus = Focus::Editor;
                }
            }
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Tab) {
            self.focus = Focus::Sidebar;
            return;
        }
        if self.editor.input(key) {
            let text = self.editor.lines().join("\n");
            self.dispatch(Command::EditBuffer(text));
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Char(c) => prompt.input.push(c),
            KeyCode::Enter => {
                let Some(prompt) = self.prompt.take() else {
                    return;
                };
                let input = prompt.input.trim().to_string();
                if input.is_empty() {
                    return;
                }
                match prompt.kind {
                    PromptKind::OpenFolder => {
                        self.dispatch(Command::OpenFolderSelected(PathBuf::from(input)));
                    }
                    PromptKind::NewEntry => {
                        self.dispatch(Command::NewEntry(input));
                        if self.journal.active().is_some() {
                            self.focus = Focus::Editor;
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        if kind == PromptKind::NewEntry && self.journal.directory().is_none() {
            return;
        }
        let input = match kind {
            PromptKind::OpenFolder => self
                .journal
                .directory()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default(),
            PromptKind::NewEntry => String::new(),
        };
        self.prompt = Some(Prompt { kind, input });
    }

    fn next_entry(&mut self) {
        let len = self.journal.entries().len();
        if len == 0 {
            return;
        }
        let next = match self.journal.active() {
            Some(active) => (active.index() + 1) % len,
            None => 0,
        };
        self.dispatch(Command::SelectEntry(next));
    }

    fn previous_entry(&mut self) {
        let len = self.journal.entries().len();
        if len == 0 {
            return;
        }
        let previous = match self.journal.active() {
            Some(active) if active.index() == 0 => len - 1,
            Some(active) => active.index() - 1,
            None => 0,
        };
        self.dispatch(Command::SelectEntry(previous));
    }

    fn quit(&mut self) {
        if let Err(e) = self.journal.close() {
            log::error!("Failed to save before quitting: {e}");
        }
        self.should_quit = true;
    }

    fn dispatch(&mut self, command: Command) {
        self.journal.handle(command, &mut self.settings);
        self.sync_editor();
    }

    /// Reload the editor widget when the active entry has changed underneath it.
    fn sync_editor(&mut self) {
        self.entry_list
            .select(self.journal.active().map(|active| active.index()));

        let active_path = self
            .journal
            .active_entry()
            .map(|entry| entry.path().to_path_buf());
        if active_path == self.loaded {
            return;
        }

        self.editor = TextArea::new(
            self.journal
                .buffer()
                .split('\n')
                .map(str::to_string)
                .collect(),
        );
        self.loaded = active_path;
        if self.loaded.is_none() {
            self.focus = Focus::Sidebar;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_engine::DirectorySettings;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    /// Journal with two entries plus a config file, both in scratch space
    fn test_app() -> (TempDir, TempDir, App) {
        let journal_dir = tempfile::tempdir().unwrap();
        fs::write(journal_dir.path().join("A_01-01-2024.md"), "alpha").unwrap();
        fs::write(journal_dir.path().join("B_03-01-2024.md"), "bravo\nline two").unwrap();
        let config_dir = tempfile::tempdir().unwrap();
        let mut settings = ConfigStore::new(config_dir.path().join("config.toml"));

        let mut journal = Journal::new(FileStorage);
        journal.choose_directory(journal_dir.path(), &mut settings);
        let app = App::new(journal, settings);
        (journal_dir, config_dir, app)
    }

    #[test]
    fn test_starts_on_newest_entry() {
        let (_journal, _config, app) = test_app();

        assert_eq!(app.entry_list.selected(), Some(0));
        assert_eq!(app.editor.lines(), ["bravo", "line two"]);
        assert_eq!(app.focus, Focus::Sidebar);
    }

    #[test]
    fn test_sidebar_navigation_wraps() {
        let (_journal, _config, mut app) = test_app();

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.entry_list.selected(), Some(1));
        assert_eq!(app.editor.lines(), ["alpha"]);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.entry_list.selected(), Some(0));

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.entry_list.selected(), Some(1));
    }

    #[test]
    fn test_tab_toggles_focus_without_editing() {
        let (_journal, _config, mut app) = test_app();

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Editor);

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Sidebar);
        assert_eq!(app.journal.buffer(), "bravo\nline two");
        assert!(!app.journal.active().unwrap().is_dirty());
    }

    #[test]
    fn test_typing_edits_buffer_and_ctrl_s_saves() {
        let (journal_dir, _config, mut app) = test_app();

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.focus, Focus::Editor);
        type_text(&mut app, "> ");
        app.handle_key(ctrl('s'));

        assert_eq!(
            fs::read_to_string(journal_dir.path().join("B_03-01-2024.md")).unwrap(),
            "> bravo\nline two"
        );
    }

    #[test]
    fn test_escape_returns_to_sidebar() {
        let (_journal, _config, mut app) = test_app();
        app.handle_key(key(KeyCode::Enter));

        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.focus, Focus::Sidebar);
    }

    #[test]
    fn test_new_entry_prompt() {
        let (journal_dir, _config, mut app) = test_app();

        app.handle_key(ctrl('n'));
        type_text(&mut app, "Dream");
        app.handle_key(key(KeyCode::Enter));

        assert!(app.prompt.is_none());
        assert_eq!(app.focus, Focus::Editor);
        assert_eq!(app.journal.active_entry().unwrap().title(), "Dream");
        assert_eq!(app.editor.lines(), [""]);
        assert_eq!(app.journal.entries().len(), 3);
        let created = fs::read_dir(journal_dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .any(|e| e.file_name().to_string_lossy().starts_with("Dream_"));
        assert!(created);
    }

    #[test]
    fn test_cancelled_prompt_does_nothing() {
        let (_journal, _config, mut app) = test_app();

        app.handle_key(ctrl('n'));
        type_text(&mut app, "Nope");
        app.handle_key(key(KeyCode::Esc));

        assert!(app.prompt.is_none());
        assert_eq!(app.journal.entries().len(), 2);
    }

    #[test]
    fn test_open_folder_prompt_switches_and_remembers() {
        let (_journal, config_dir, mut app) = test_app();
        let other = tempfile::tempdir().unwrap();
        fs::write(other.path().join("C_01-02-2024.md"), "charlie").unwrap();

        app.handle_key(ctrl('o'));
        app.prompt.as_mut().unwrap().input.clear();
        type_text(&mut app, &other.path().display().to_string());
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.editor.lines(), ["charlie"]);
        let reopened = ConfigStore::new(config_dir.path().join("config.toml"));
        assert_eq!(reopened.last_directory(), Some(other.path().to_path_buf()));
    }

    #[test]
    fn test_quit_flushes_buffer() {
        let (journal_dir, _config, mut app) = test_app();
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "x");

        app.handle_key(ctrl('q'));

        assert!(app.should_quit);
        assert_eq!(
            fs::read_to_string(journal_dir.path().join("B_03-01-2024.md")).unwrap(),
            "xbravo\nline two"
        );
    }
}

use crate::app::{App, Focus};
use journal_engine::preview::{self, LineKind, PreviewLine};
use journal_engine::{JournalState, NoticeLevel};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

const ACCENT: Color = Color::Cyan;

pub fn draw(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    if app.journal.state() == JournalState::NoDirectory {
        draw_welcome(f, rows[0]);
    } else {
        draw_journal(f, app, rows[0]);
    }
    draw_status(f, app, rows[1]);
}

fn draw_welcome(f: &mut Frame, area: Rect) {
    let message = Paragraph::new(vec![
        Line::from(""),
        Line::from("Press Ctrl+O to open a journal directory"),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Journal"));
    f.render_widget(message, area);
}

fn draw_journal(f: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(25),
                Constraint::Percentage(40),
                Constraint::Percentage(35),
            ]
            .as_ref(),
        )
        .split(area);

    draw_entry_list(f, app, columns[0]);
    draw_editor(f, app, columns[1]);
    draw_preview(f, app, columns[2]);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default()
    }
}

fn draw_entry_list(f: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .journal
        .entries()
        .iter()
        .map(|entry| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    entry.title().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    entry.date().to_string(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let title = if items.is_empty() {
        "Entries (none)"
    } else {
        "Entries"
    };
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(app.focus == Focus::Sidebar))
                .title(title),
        )
        .highlight_style(Style::default().bg(ACCENT).fg(Color::Black));

    f.render_stateful_widget(list, area, &mut app.entry_list);
}

fn draw_editor(f: &mut Frame, app: &mut App, area: Rect) {
    let title = match (app.journal.active_entry(), app.journal.active()) {
        (Some(entry), Some(active)) if active.is_dirty() => format!("{} *", entry.file_name()),
        (Some(entry), _) => entry.file_name(),
        _ => "Editor".to_string(),
    };
    app.editor.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(app.focus == Focus::Editor))
            .title(title),
    );
    app.editor.set_cursor_line_style(Style::default());
    f.render_widget(&app.editor, area);
}

fn draw_preview(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = preview::render_lines(app.journal.buffer())
        .into_iter()
        .map(styled_line)
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Preview"))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn styled_line(line: PreviewLine) -> Line<'static> {
    let style = match line.kind {
        LineKind::Heading(1) => Style::default()
            .fg(ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        LineKind::Heading(_) => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        LineKind::Quote => Style::default().add_modifier(Modifier::ITALIC),
        LineKind::Code => Style::default().fg(Color::Yellow),
        LineKind::Rule => Style::default().fg(Color::DarkGray),
        LineKind::Paragraph | LineKind::ListItem | LineKind::Blank => Style::default(),
    };
    Line::from(Span::styled(line.text, style))
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(prompt) = &app.prompt {
        Line::from(vec![
            Span::styled(
                format!("{}: ", prompt.label()),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::raw(prompt.input.clone()),
            Span::styled("█", Style::default().fg(ACCENT)),
        ])
    } else if let Some(notice) = app.journal.notice() {
        let color = match notice.level {
            NoticeLevel::Info => Color::Green,
            NoticeLevel::Error => Color::Red,
        };
        Line::from(Span::styled(notice.message.clone(), Style::default().fg(color)))
    } else {
        Line::from(vec![
            Span::raw("Ctrl+O: Open folder | "),
            Span::raw("Ctrl+N: New entry | "),
            Span::raw("Ctrl+S: Save | "),
            Span::raw("Enter: Edit | Esc: Entries | "),
            Span::raw("Ctrl+Q: Quit"),
        ])
    };
    f.render_widget(Paragraph::new(line), area);
}

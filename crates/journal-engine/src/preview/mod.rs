//! Rendered preview of the active buffer, via pulldown-cmark.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Render markdown to an HTML fragment for the desktop preview pane
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading(u8),
    Paragraph,
    ListItem,
    Quote,
    Code,
    Rule,
    Blank,
}

/// One display line of the terminal preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    pub kind: LineKind,
    pub text: String,
}

impl PreviewLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Flatten markdown into styled lines for a terminal.
///
/// Inline formatting is dropped; block structure becomes prefixes such as
/// `• ` for list items and `│ ` for quotes.
pub fn render_lines(markdown: &str) -> Vec<PreviewLine> {
    let mut builder = LineBuilder::default();
    for event in Parser::new_ext(markdown, options()) {
        builder.push(event);
    }
    builder.finish()
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<PreviewLine>,
    current: String,
    kind: Option<LineKind>,
    quote_depth: usize,
    list_depth: usize,
    in_code: bool,
}

impl LineBuilder {
    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                self.kind = Some(LineKind::Heading(heading_number(level)));
            }
            Event::Start(Tag::Paragraph) => {
                if self.kind.is_none() {
                    self.kind = Some(self.block_kind());
                }
            }
            Event::Start(Tag::BlockQuote(_)) => self.quote_depth += 1,
            Event::Start(Tag::List(_)) => {
                self.flush_line();
                self.list_depth += 1;
            }
            Event::Start(Tag::Item) => {
                self.flush_line();
                self.kind = Some(LineKind::ListItem);
                self.current
                    .push_str(&"  ".repeat(self.list_depth.saturating_sub(1)));
                self.current.push_str("• ");
            }
            Event::Start(Tag::CodeBlock(kind)) => {
                self.in_code = true;
                if let CodeBlockKind::Fenced(lang) = kind
                    && !lang.is_empty()
                {
                    self.lines
                        .push(PreviewLine::new(LineKind::Code, format!("[{lang}]")));
                }
            }
            Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::Paragraph) => {
                let in_item = self.kind == Some(LineKind::ListItem);
                self.flush_line();
                if !in_item && self.list_depth == 0 {
                    self.blank();
                }
            }
            Event::End(TagEnd::Item) => self.flush_line(),
            Event::End(TagEnd::List(_)) => {
                self.flush_line();
                self.list_depth = self.list_depth.saturating_sub(1);
                if self.list_depth == 0 {
                    self.blank();
                }
            }
            Event::End(TagEnd::BlockQuote(_)) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            Event::End(TagEnd::CodeBlock) => {
                self.in_code = false;
                self.blank();
            }
            Event::Text(text) if self.in_code => {
                for line in text.lines() {
                    self.lines.push(PreviewLine::new(LineKind::Code, line));
                }
            }
            Event::Text(text) | Event::Code(text) => self.text(&text),
            Event::TaskListMarker(done) => self.text(if done { "[x] " } else { "[ ] " }),
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.lines.push(PreviewLine::new(LineKind::Rule, "─".repeat(20)));
                self.blank();
            }
            _ => {}
        }
    }

    fn block_kind(&self) -> LineKind {
        if self.quote_depth > 0 {
            LineKind::Quote
        } else {
            LineKind::Paragraph
        }
    }

    fn text(&mut self, text: &str) {
        if self.kind.is_none() {
            self.kind = Some(self.block_kind());
        }
        if self.current.is_empty() && self.quote_depth > 0 {
            self.current.push_str(&"│ ".repeat(self.quote_depth));
        }
        self.current.push_str(text);
    }

    fn flush_line(&mut self) {
        let kind = self.kind.take();
        if self.current.trim().is_empty() || self.current.trim_end() == "•" {
            self.current.clear();
            return;
        }
        let text = std::mem::take(&mut self.current);
        self.lines
            .push(PreviewLine::new(kind.unwrap_or(LineKind::Paragraph), text));
    }

    fn blank(&mut self) {
        if self
            .lines
            .last()
            .is_some_and(|line| line.kind != LineKind::Blank)
        {
            self.lines.push(PreviewLine::new(LineKind::Blank, ""));
        }
    }

    fn finish(mut self) -> Vec<PreviewLine> {
        self.flush_line();
        while self.lines.last().is_some_and(|l| l.kind == LineKind::Blank) {
            self.lines.pop();
        }
        self.lines
    }
}

fn heading_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds_and_text(lines: &[PreviewLine]) -> Vec<(LineKind, &str)> {
        lines.iter().map(|l| (l.kind, l.text.as_str())).collect()
    }

    #[test]
    fn test_render_html_heading_and_emphasis() {
        let html = render_html("# Today\n\nA *good* day");
        insta::assert_snapshot!(html, @r"
        <h1>Today</h1>
        <p>A <em>good</em> day</p>
        ");
    }

    #[test]
    fn test_render_html_task_list() {
        let html = render_html("- [x] walk\n- [ ] write");
        assert!(html.contains("checked"));
        assert!(html.contains("walk"));
        assert!(html.contains("write"));
    }

    #[test]
    fn test_render_html_empty() {
        assert_eq!(render_html(""), "");
    }

    #[test]
    fn test_render_lines_blocks() {
        let lines = render_lines("# Title\n\nSome text\nwrapped\n\n- one\n- two\n\n> quoted");

        assert_eq!(
            kinds_and_text(&lines),
            vec![
                (LineKind::Heading(1), "Title"),
                (LineKind::Blank, ""),
                (LineKind::Paragraph, "Some text wrapped"),
                (LineKind::Blank, ""),
                (LineKind::ListItem, "• one"),
                (LineKind::ListItem, "• two"),
                (LineKind::Blank, ""),
                (LineKind::Quote, "│ quoted"),
            ]
        );
    }

    #[test]
    fn test_render_lines_code_block() {
        let lines = render_lines("```rust\nfn main() {}\n```");

        assert_eq!(
            kinds_and_text(&lines),
            vec![
                (LineKind::Code, "[rust]"),
                (LineKind::Code, "fn main() {}"),
            ]
        );
    }

    #[test]
    fn test_render_lines_empty() {
        assert!(render_lines("").is_empty());
    }
}

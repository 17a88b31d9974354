//! Scrolling log of conversation turns

use crate::state_machine::{Message, Sender};
use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const TAB_WIDTH: usize = 4;

/// One rendered turn
#[derive(Debug, Clone)]
pub struct Entry {
    pub message: Message,
    pub at: DateTime<Local>,
}

/// Append-only transcript. Follows the newest turn unless scrolled back.
#[derive(Debug, Default)]
pub struct TranscriptView {
    entries: Vec<Entry>,
    /// Lines scrolled up from the tail; 0 follows the tail
    scroll_back: u16,
}

impl TranscriptView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        let message = Message {
            text: sanitize(&message.text),
            sender: message.sender,
        };
        self.entries.push(Entry {
            message,
            at: Local::now(),
        });
        self.scroll_back = 0;
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }

    #[cfg(test)]
    pub fn follows_tail(&self) -> bool {
        self.scroll_back == 0
    }

    /// Layout every entry for a given text width
    fn lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for entry in &self.entries {
            let (label, color) = match entry.message.sender {
                Sender::User => ("Você", Color::Cyan),
                Sender::Bot => ("GuIA", Color::Green),
            };
            lines.push(Line::from(vec![
                Span::styled(
                    label,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", entry.at.format("%H:%M")),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            for text_line in entry.message.text.split('\n') {
                for chunk in wrap(text_line, width) {
                    lines.push(Line::from(chunk));
                }
            }
            lines.push(Line::default());
        }
        lines
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" GuIA Carreiras ");
        let inner = block.inner(area);
        let lines = self.lines(usize::from(inner.width.max(1)));

        let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let max_offset = total.saturating_sub(inner.height);
        self.scroll_back = self.scroll_back.min(max_offset);
        let offset = max_offset - self.scroll_back;

        let widget = Paragraph::new(lines).block(block).scroll((offset, 0));
        frame.render_widget(widget, area);
    }
}

/// Strip terminal control sequences from backend text
pub fn sanitize(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str(&" ".repeat(TAB_WIDTH)),
            '\u{1b}' => {
                // CSI: ESC [ params final-byte
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for next in chars.by_ref() {
                        if ('\u{40}'..='\u{7e}').contains(&next) {
                            break;
                        }
                    }
                }
            }
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Word-wrap one line to `width` display columns
fn wrap(line: &str, width: usize) -> Vec<String> {
    textwrap::wrap(line, width.max(1))
        .into_iter()
        .map(std::borrow::Cow::into_owned)
        .collect()
}

//! Input region: text entry, two-choice confirmation or busy status

use crate::state_machine::Event;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Affirm,
    Defer,
}

impl Choice {
    fn toggled(self) -> Self {
        match self {
            Choice::Affirm => Choice::Defer,
            Choice::Defer => Choice::Affirm,
        }
    }
}

/// The control currently in the input region
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mounted {
    Empty,
    TextEntry {
        placeholder: String,
    },
    Confirmation {
        affirm: String,
        defer: String,
        selected: Choice,
    },
    Busy {
        status: String,
    },
}

#[derive(Debug)]
pub struct InputPanel {
    mounted: Mounted,
    enabled: bool,
    /// Typed text, kept across re-mounts
    buffer: String,
    /// Cursor position in chars
    cursor: usize,
}

impl Default for InputPanel {
    fn default() -> Self {
        Self {
            mounted: Mounted::Empty,
            enabled: true,
            buffer: String::new(),
            cursor: 0,
        }
    }
}

impl InputPanel {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn mounted(&self) -> &Mounted {
        &self.mounted
    }

    #[cfg(test)]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn show_text_entry(&mut self, placeholder: &str) {
        self.mounted = Mounted::TextEntry {
            placeholder: placeholder.to_string(),
        };
    }

    pub fn show_confirmation(&mut self, affirm: &str, defer: &str) {
        self.mounted = Mounted::Confirmation {
            affirm: affirm.to_string(),
            defer: defer.to_string(),
            selected: Choice::Affirm,
        };
    }

    pub fn show_busy(&mut self, status: &str) {
        self.mounted = Mounted::Busy {
            status: status.to_string(),
        };
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Apply a key press. Returns the controller event it triggers, if any.
    ///
    /// Emitting an event disables the panel until the runtime re-enables it.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Event> {
        if !self.enabled {
            return None;
        }

        let event = self.route_key(key);
        if event.is_some() {
            self.enabled = false;
        }
        event
    }

    fn route_key(&mut self, key: KeyEvent) -> Option<Event> {
        match &mut self.mounted {
            Mounted::Empty | Mounted::Busy { .. } => None,
            Mounted::TextEntry { .. } => {
                if key.code == KeyCode::Enter {
                    return self.take_submit();
                }
                self.edit(key);
                None
            }
            Mounted::Confirmation { selected, .. } => match key.code {
                KeyCode::Tab | KeyCode::BackTab => {
                    *selected = selected.toggled();
                    None
                }
                KeyCode::Left | KeyCode::Right if self.buffer.is_empty() => {
                    *selected = selected.toggled();
                    None
                }
                KeyCode::Enter => {
                    if self.buffer.trim().is_empty() {
                        Some(match selected {
                            Choice::Affirm => Event::Affirm,
                            Choice::Defer => Event::Defer,
                        })
                    } else {
                        self.take_submit()
                    }
                }
                _ => {
                    self.edit(key);
                    None
                }
            },
        }
    }

    fn take_submit(&mut self) -> Option<Event> {
        if self.buffer.trim().is_empty() {
            return None;
        }
        self.cursor = 0;
        Some(Event::UserSubmit {
            text: std::mem::take(&mut self.buffer),
        })
    }

    fn edit(&mut self, key: KeyEvent) {
        let len = self.buffer.chars().count();
        match key.code {
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                let at = self.byte_index(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Backspace if self.cursor > 0 => {
                let at = self.byte_index(self.cursor - 1);
                self.buffer.remove(at);
                self.cursor -= 1;
            }
            KeyCode::Delete if self.cursor < len => {
                let at = self.byte_index(self.cursor);
                self.buffer.remove(at);
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(len),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = len,
            _ => {}
        }
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let base = if self.enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let hint = Style::default().fg(Color::DarkGray);

        let (title, lines, cursor_row) = match &self.mounted {
            Mounted::Empty => (" ", vec![], None),
            Mounted::TextEntry { placeholder } => {
                let line = if self.buffer.is_empty() {
                    Line::from(Span::styled(placeholder.clone(), hint))
                } else {
                    Line::from(self.buffer.clone())
                };
                (" Mensagem ", vec![line], Some(0))
            }
            Mounted::Confirmation {
                affirm,
                defer,
                selected,
            } => {
                let button = |label: &str, choice: Choice| {
                    let style = if *selected == choice && self.enabled {
                        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Span::styled(format!("[ {label} ]"), style)
                };
                let reply = if self.buffer.is_empty() {
                    Line::from(Span::styled("Ou digite uma resposta...", hint))
                } else {
                    Line::from(self.buffer.clone())
                };
                (
                    " Gerar perfil? ",
                    vec![
                        Line::from(vec![
                            button(affirm, Choice::Affirm),
                            Span::raw("   "),
                            button(defer, Choice::Defer),
                        ]),
                        reply,
                    ],
                    Some(1),
                )
            }
            Mounted::Busy { status } => (
                " Aguarde ",
                vec![Line::from(Span::styled(
                    status.clone(),
                    Style::default().add_modifier(Modifier::ITALIC),
                ))],
                None,
            ),
        };

        let widget = Paragraph::new(lines)
            .style(base)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(widget, area);

        if let (true, Some(row)) = (self.enabled, cursor_row) {
            let col = u16::try_from(self.buffer.chars().take(self.cursor).count()).unwrap_or(0);
            frame.set_cursor_position(Position::new(
                area.x.saturating_add(1).saturating_add(col),
                area.y.saturating_add(1).saturating_add(row),
            ));
        }
    }
}

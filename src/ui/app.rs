//! Terminal host: owns the screen, forwards keys to the runtime

use super::input::InputPanel;
use super::transcript::TranscriptView;
use crate::runtime::{InputSurface, Navigator, Transcript};
use crate::state_machine::{Event, Message};
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const SCROLL_STEP: u16 = 5;
const INPUT_HEIGHT: u16 = 4;

/// Requests from the runtime to the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Append(Message),
    ShowTextEntry(String),
    ShowConfirmation { affirm: String, defer: String },
    ShowBusy(String),
    SetEnabled(bool),
    Navigate(String),
}

/// Why the terminal loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    Navigate(String),
}

/// View handle given to the runtime. Calls are queued for the UI thread.
#[derive(Clone)]
pub struct TerminalView {
    tx: mpsc::UnboundedSender<UiCommand>,
}

impl TerminalView {
    pub fn new(tx: mpsc::UnboundedSender<UiCommand>) -> Self {
        Self { tx }
    }

    fn send(&self, command: UiCommand) {
        if self.tx.send(command).is_err() {
            tracing::debug!("Terminal closed, dropping view update");
        }
    }
}

impl Transcript for TerminalView {
    fn append(&self, message: Message) {
        self.send(UiCommand::Append(message));
    }
}

impl InputSurface for TerminalView {
    fn show_text_entry(&self, placeholder: &str) {
        self.send(UiCommand::ShowTextEntry(placeholder.to_string()));
    }

    fn show_confirmation(&self, affirm: &str, defer: &str) {
        self.send(UiCommand::ShowConfirmation {
            affirm: affirm.to_string(),
            defer: defer.to_string(),
        });
    }

    fn show_busy(&self, status: &str) {
        self.send(UiCommand::ShowBusy(status.to_string()));
    }

    fn set_enabled(&self, enabled: bool) {
        self.send(UiCommand::SetEnabled(enabled));
    }
}

/// Leaves the chat screen for the report
pub struct TerminalNavigator {
    tx: mpsc::UnboundedSender<UiCommand>,
}

impl TerminalNavigator {
    pub fn new(tx: mpsc::UnboundedSender<UiCommand>) -> Self {
        Self { tx }
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, destination: &str) -> Result<(), String> {
        self.tx
            .send(UiCommand::Navigate(destination.to_string()))
            .map_err(|_| "terminal already closed".to_string())
    }
}

/// Screen state
pub struct ChatApp {
    transcript: TranscriptView,
    input: InputPanel,
    events: mpsc::Sender<Event>,
    exit: Option<ExitReason>,
}

impl ChatApp {
    pub fn new(events: mpsc::Sender<Event>) -> Self {
        Self {
            transcript: TranscriptView::new(),
            input: InputPanel::new(),
            events,
            exit: None,
        }
    }

    pub fn exit_reason(&self) -> Option<&ExitReason> {
        self.exit.as_ref()
    }

    pub fn apply(&mut self, command: UiCommand) {
        match command {
            UiCommand::Append(message) => self.transcript.push(message),
            UiCommand::ShowTextEntry(placeholder) => self.input.show_text_entry(&placeholder),
            UiCommand::ShowConfirmation { affirm, defer } => {
                self.input.show_confirmation(&affirm, &defer);
            }
            UiCommand::ShowBusy(status) => self.input.show_busy(&status),
            UiCommand::SetEnabled(enabled) => self.input.set_enabled(enabled),
            UiCommand::Navigate(destination) => self.exit = Some(ExitReason::Navigate(destination)),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.exit = Some(ExitReason::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.exit = Some(ExitReason::Quit);
            }
            KeyCode::PageUp => self.transcript.scroll_up(SCROLL_STEP),
            KeyCode::PageDown => self.transcript.scroll_down(SCROLL_STEP),
            _ => {
                if let Some(event) = self.input.handle_key(key) {
                    tracing::debug!(event = event.name(), "User action");
                    if let Err(e) = self.events.try_send(event) {
                        tracing::warn!(error = %e, "Could not deliver user action");
                    }
                }
            }
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.transcript.render(frame, chunks[0]);
        self.input.render(frame, chunks[1]);

        let help = Paragraph::new(Line::from(
            "Enter enviar · Tab alternar · PgUp/PgDn rolar · Esc sair",
        ))
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}

/// Raw mode and the alternate screen, restored on drop
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Run the chat screen until the user quits or the runtime navigates away.
///
/// Blocking; call from a dedicated thread.
pub fn run_terminal(
    mut commands: mpsc::UnboundedReceiver<UiCommand>,
    events: mpsc::Sender<Event>,
) -> io::Result<ExitReason> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut app = ChatApp::new(events);

    let reason = loop {
        while let Ok(command) = commands.try_recv() {
            app.apply(command);
        }
        if let Some(reason) = app.exit_reason() {
            break reason.clone();
        }

        terminal.draw(|frame| app.draw(frame))?;

        if event::poll(POLL_INTERVAL)? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    };

    terminal.show_cursor()?;
    tracing::info!(reason = ?reason, "Terminal closed");
    Ok(reason)
}

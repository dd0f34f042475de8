//! Main TUI application.
//!
//! Handles:
//! - Screen navigation
//! - Translating key presses into session events
//! - Carrying out session effects (background requests, toasts)

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::HttpPredictionClient;
use crate::application::{report, Effect, Event, PredictionSession, View};
use crate::config::Config;
use crate::domain::{FieldEdit, Notification};
use crate::ports::PredictionService;

use super::ui::{
    form::{render_form, FormCursor},
    home::render_home,
    render_disclaimer, render_tabs,
    result::render_result,
    toast::{render_toasts, Toasts},
};
use super::worker::{PredictionWorker, PredictionWorkerHandle};

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Predict,
}

/// Main application state
pub struct App {
    screen: Screen,
    should_quit: bool,

    /// Prediction backend shared with workers
    service: Arc<dyn PredictionService>,

    /// Form values, request status, result and active tab
    session: PredictionSession,

    cursor: FormCursor,

    /// Worker for the in-flight request, if any
    pending_worker: Option<PredictionWorkerHandle>,

    toasts: Toasts,

    report_dir: PathBuf,
}

impl App {
    /// Create an application talking to the configured prediction service.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let client = HttpPredictionClient::new(config)?;
        Ok(Self::with_dependencies(
            Arc::new(client),
            config.report_dir.clone(),
        ))
    }

    /// Create an application with an injected prediction backend.
    #[must_use]
    pub fn with_dependencies(service: Arc<dyn PredictionService>, report_dir: PathBuf) -> Self {
        Self {
            screen: Screen::Home,
            should_quit: false,
            service,
            session: PredictionSession::new(),
            cursor: FormCursor::default(),
            pending_worker: None,
            toasts: Toasts::default(),
            report_dir,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn session(&self) -> &PredictionSession {
        &self.session
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal even if the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.poll_worker();
            self.toasts.expire(Instant::now());

            terminal.draw(|f| self.draw(f))?;

            // Short poll to stay responsive to worker completion
            if event::poll(Duration::from_millis(50))? {
                if let TermEvent::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        if let Some(worker) = &self.pending_worker {
            tracing::info!(
                request_id = worker.request_id(),
                "Exiting with a prediction request still in flight"
            );
        }
        Ok(())
    }

    /// Draw the current screen.
    pub fn draw(&self, f: &mut Frame) {
        let area = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(area);

        match self.screen {
            Screen::Home => render_home(f, chunks[0], self.service.endpoint()),
            Screen::Predict => {
                let inner = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(2), Constraint::Min(0)])
                    .split(chunks[0]);

                render_tabs(f, inner[0], self.session.view(), self.session.result_available());
                match self.session.view() {
                    View::Form => render_form(f, inner[1], &self.session, self.cursor),
                    View::Result => render_result(f, inner[1], self.session.result()),
                }
            }
        }

        render_disclaimer(f, chunks[1]);
        render_toasts(f, area, &self.toasts);
    }

    /// Feed a finished request back into the session.
    fn poll_worker(&mut self) {
        let Some(done) = self.pending_worker.as_ref().and_then(PredictionWorkerHandle::try_recv) else {
            return;
        };
        self.pending_worker = None;

        let effects = self.session.update(Event::Completed {
            request_id: done.request_id,
            outcome: done.outcome,
        });
        self.apply_effects(effects);
    }

    fn dispatch(&mut self, event: Event) {
        let effects = self.session.update(event);
        self.apply_effects(effects);
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Dispatch { request_id, params } => {
                    let worker = PredictionWorker::spawn(self.service.clone(), request_id, params);
                    self.pending_worker = Some(worker);
                }
                Effect::Notify(notification) => self.notify(notification),
            }
        }
    }

    fn notify(&mut self, notification: Notification) {
        tracing::info!(
            title = %notification.title,
            variant = ?notification.variant,
            "{}",
            notification.description
        );
        self.toasts.push(notification);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Predict => match self.session.view() {
                View::Form => self.handle_form_key(key),
                View::Result => self.handle_result_key(key),
            },
        }
    }

    fn handle_home_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => {
                self.screen = Screen::Predict;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        let field = self.cursor.field();
        match key {
            KeyCode::Esc => {
                self.screen = Screen::Home;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.cursor.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.cursor.next_field();
            }
            KeyCode::Left => self.dispatch(Event::Edit {
                field,
                edit: FieldEdit::Decrement,
            }),
            KeyCode::Right => self.dispatch(Event::Edit {
                field,
                edit: FieldEdit::Increment,
            }),
            KeyCode::Backspace => self.dispatch(Event::Edit {
                field,
                edit: FieldEdit::Backspace,
            }),
            KeyCode::Delete => self.dispatch(Event::Edit {
                field,
                edit: FieldEdit::Clear,
            }),
            KeyCode::Enter => self.dispatch(Event::Submit),
            KeyCode::Char('r') | KeyCode::Char('R') => self.dispatch(Event::ShowResult),
            KeyCode::Char('d') | KeyCode::Char('D') => self.dispatch(Event::ResetDefaults),
            KeyCode::Char(c) => self.dispatch(Event::Edit {
                field,
                edit: FieldEdit::Insert(c),
            }),
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('f') | KeyCode::Char('F') => {
                self.dispatch(Event::ShowForm);
            }
            KeyCode::Char('p') | KeyCode::Char('P') => self.save_report(),
            KeyCode::Char('h') | KeyCode::Char('H') => {
                self.screen = Screen::Home;
            }
            _ => {}
        }
    }

    fn save_report(&mut self) {
        let (Some(params), Some(result)) = (
            self.session.assessed_parameters(),
            self.session.result(),
        ) else {
            return;
        };

        let notification = match report::write_report(&self.report_dir, params, result) {
            Ok(path) => Notification::info("Report Saved", path.display().to_string()),
            Err(e) => {
                tracing::error!("Failed to write report: {}", e);
                Notification::destructive("Report Failed", e.to_string())
            }
        };
        self.notify(notification);
    }
}

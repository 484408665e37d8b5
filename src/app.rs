//! Application state and event handling.
//!
//! Elm-style: a single `App` struct holds all state, key events mutate it
//! and may emit a `DataCommand` for the worker, worker messages flow back in
//! through `handle_data_message`. The item list is rebuilt from scratch on
//! every load; nothing is cached across passes.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::{DataCommand, DataMessage};
use crate::config::TimelineOptions;
use crate::item::build_items;
use crate::models::{AuthorRecord, VisualItem};
use crate::timeline::TimelineState;

/// Approximate bar-area width used for zoom and jump math when the real
/// viewport width is not at hand.
const APPROX_VIEWPORT_COLUMNS: u16 = 80;

/// Error popup state.
#[derive(Debug, Clone)]
pub struct ErrorPopup {
    pub title: String,
    pub message: String,
    shown_at: Instant,
    auto_dismiss: Option<Duration>,
}

impl ErrorPopup {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            shown_at: Instant::now(),
            auto_dismiss: Some(Duration::from_secs(8)),
        }
    }

    pub fn should_dismiss(&self) -> bool {
        self.auto_dismiss
            .map(|d| self.shown_at.elapsed() > d)
            .unwrap_or(false)
    }
}

/// Entry in the diagnostic log pane.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub message: String,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Error,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: LogLevel::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: LogLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: LogLevel::Error,
        }
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    pub should_quit: bool,

    /// Raw records from the last successful load.
    pub records: Vec<AuthorRecord>,

    /// Renderable items derived from the records.
    pub items: Vec<VisualItem>,

    /// Widget configuration, fixed at startup.
    pub options: TimelineOptions,

    /// Timeline scroll/zoom/selection state.
    pub timeline_state: TimelineState,

    pub error_popup: Option<ErrorPopup>,

    /// Diagnostic log, newest last.
    pub logs: Vec<LogEntry>,
    max_logs: usize,

    pub is_loading: bool,
    pub last_refresh: Option<Instant>,
    pub show_help: bool,
}

impl App {
    pub fn new(options: TimelineOptions) -> Self {
        let timeline_state = TimelineState::new(&options);
        let mut app = Self {
            should_quit: false,
            records: Vec::new(),
            items: Vec::new(),
            options,
            timeline_state,
            error_popup: None,
            logs: Vec::new(),
            max_logs: 100,
            is_loading: true,
            last_refresh: None,
            show_help: false,
        };
        app.log(LogEntry::info("Author timeline initialized"));
        app
    }

    pub fn log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
        if self.logs.len() > self.max_logs {
            self.logs.remove(0);
        }
    }

    pub fn show_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        let title = title.into();
        let message = message.into();
        self.log(LogEntry::error(format!("{}: {}", title, message)));
        self.error_popup = Some(ErrorPopup::new(title, message));
    }

    /// Item currently selected on the timeline.
    pub fn selected_item(&self) -> Option<&VisualItem> {
        self.timeline_state.selected.and_then(|i| self.items.get(i))
    }

    /// Record backing the selected item.
    pub fn selected_record(&self) -> Option<&AuthorRecord> {
        self.timeline_state.selected.and_then(|i| self.records.get(i))
    }

    /// Apply a worker message.
    pub fn handle_data_message(&mut self, message: DataMessage) {
        match message {
            DataMessage::AuthorsLoaded(records) => {
                let count = records.len();
                self.items = build_items(&records);
                self.records = records;
                self.is_loading = false;
                self.last_refresh = Some(Instant::now());
                self.log(LogEntry::success(format!("Loaded {} authors", count)));

                if !self.items.is_empty() && self.timeline_state.selected.is_none() {
                    self.timeline_state.selected = Some(0);
                }
                // Clamp a stale selection from a previous, larger load.
                if let Some(i) = self.timeline_state.selected {
                    if i >= self.items.len() {
                        self.timeline_state.selected =
                            if self.items.is_empty() { None } else { Some(0) };
                    }
                }
            }
            DataMessage::Error(error) => {
                self.is_loading = false;
                self.show_error("Load failed", error);
            }
        }
    }

    /// Handle a key event; may emit a command for the data worker.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<DataCommand> {
        if self.error_popup.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ')) {
                self.error_popup = None;
            }
            return None;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                self.show_help = false;
            }
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return Some(DataCommand::Shutdown);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return Some(DataCommand::Shutdown);
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return None;
            }
            KeyCode::Char('r') => {
                self.is_loading = true;
                self.log(LogEntry::info("Refreshing author data..."));
                return Some(DataCommand::Refresh);
            }
            _ => {}
        }

        self.handle_timeline_key(key);
        None
    }

    fn handle_timeline_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left if self.options.horizontal_scroll => {
                let amount = if key.modifiers.contains(KeyModifiers::SHIFT) { 10 } else { 2 };
                self.timeline_state.scroll_left(amount);
            }
            KeyCode::Char('l') | KeyCode::Right if self.options.horizontal_scroll => {
                let amount = if key.modifiers.contains(KeyModifiers::SHIFT) { 10 } else { 2 };
                self.timeline_state.scroll_right(amount);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.timeline_state.select_next(self.items.len());
                self.jump_to_selection();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.timeline_state.select_previous(self.items.len());
                self.jump_to_selection();
            }
            KeyCode::Enter => {
                self.jump_to_selection();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.timeline_state
                    .zoom_in(&self.options, APPROX_VIEWPORT_COLUMNS);
            }
            KeyCode::Char('-') => {
                self.timeline_state
                    .zoom_out(&self.options, APPROX_VIEWPORT_COLUMNS);
            }
            KeyCode::Char('t') | KeyCode::Home => {
                self.timeline_state.reset_view(&self.options);
            }
            _ => {}
        }
    }

    /// Scroll the viewport to the selected item.
    fn jump_to_selection(&mut self) {
        if let Some(item) = self.selected_item().cloned() {
            self.timeline_state
                .jump_to_item(&item, &self.options, APPROX_VIEWPORT_COLUMNS);
        }
    }

    /// Per-frame housekeeping.
    pub fn tick(&mut self) {
        if let Some(ref popup) = self.error_popup {
            if popup.should_dismiss() {
                self.error_popup = None;
            }
        }
    }

    /// Status bar text.
    pub fn status_text(&self) -> String {
        let loading = if self.is_loading { " [Loading...]" } else { "" };
        let refreshed = self
            .last_refresh
            .map(|t| {
                let secs = t.elapsed().as_secs();
                if secs < 60 {
                    format!(" ({}s ago)", secs)
                } else {
                    format!(" ({}m ago)", secs / 60)
                }
            })
            .unwrap_or_default();

        format!(
            "{} authors{}{} | h/l: Scroll | j/k: Select | +/-: Zoom | t: Reset | r: Refresh | ?: Help | q: Quit",
            self.items.len(),
            loading,
            refreshed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemId;

    fn loaded_app() -> App {
        let mut app = App::new(TimelineOptions::default());
        let records = vec![
            AuthorRecord {
                id: ItemId::Int(1),
                content: "Vergil".to_string(),
                start: Some(-70),
                end: Some(-19),
                occupations: vec!["poet".to_string()],
                kind: None,
                title: None,
                class_name: None,
            },
            AuthorRecord {
                id: ItemId::Int(2),
                content: "Sack of Rome".to_string(),
                start: Some(410),
                end: None,
                occupations: vec![],
                kind: None,
                title: None,
                class_name: None,
            },
        ];
        app.handle_data_message(DataMessage::AuthorsLoaded(records));
        app
    }

    #[test]
    fn test_load_builds_items_and_selects_first() {
        let app = loaded_app();
        assert_eq!(app.items.len(), 2);
        assert!(!app.is_loading);
        assert_eq!(app.timeline_state.selected, Some(0));
        assert_eq!(app.selected_item().unwrap().content, "Vergil");
    }

    #[test]
    fn test_load_error_surfaces_popup_and_log() {
        let mut app = App::new(TimelineOptions::default());
        app.handle_data_message(DataMessage::Error("HTTP error: 404".to_string()));
        assert!(!app.is_loading);
        let popup = app.error_popup.as_ref().expect("popup");
        assert!(popup.message.contains("404"));
        assert!(app
            .logs
            .iter()
            .any(|e| e.level == LogLevel::Error && e.message.contains("404")));
    }

    #[test]
    fn test_reload_clamps_selection() {
        let mut app = loaded_app();
        app.timeline_state.selected = Some(1);
        app.handle_data_message(DataMessage::AuthorsLoaded(vec![]));
        assert_eq!(app.timeline_state.selected, None);
    }

    #[test]
    fn test_quit_key_shuts_worker_down() {
        let mut app = loaded_app();
        let cmd = app.handle_key(KeyEvent::from(KeyCode::Char('q')));
        assert!(app.should_quit);
        assert_eq!(cmd, Some(DataCommand::Shutdown));
    }

    #[test]
    fn test_refresh_key_emits_refresh() {
        let mut app = loaded_app();
        let cmd = app.handle_key(KeyEvent::from(KeyCode::Char('r')));
        assert_eq!(cmd, Some(DataCommand::Refresh));
        assert!(app.is_loading);
    }
}

//! Application state types and core data structures.
//!
//! Defines the App struct which holds all mutable application state,
//! plus supporting types for focus and overlays.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::Arc;

use ratatui::layout::Rect;

use crate::browser::{describe, BrowseError, DetailRow, ListOptions, Navigator};
use crate::config::Config;
use crate::events::AppEvent;
use crate::git::{spawn_log_worker, LogEntry, LogRequest};
use crate::keymap::{parse_key_chord, KeyChord};
use crate::terminal::{ShellSession, TerminalError, TerminalGuard, TerminalHost};

use super::gate::InputGate;
use super::handoff::EditorHandoff;

/// Which pane receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Browser,
    /// Keys are encoded and written to the shell (except the toggle chord).
    Shell,
}

/// Scrollable text overlay (`:ls`, `:help`).
#[derive(Debug, Default)]
pub struct CommandOverlay {
    pub visible: bool,
    pub title: String,
    pub output: String,
    pub scroll: u16,
}

/// Pending delete waiting for y/n. `file_name` is what gets removed.
#[derive(Debug, Clone)]
pub struct ConfirmDelete {
    pub name: String,
    pub file_name: OsString,
}

/// Details pane contents for the selected entry.
#[derive(Debug, Default)]
pub enum Details {
    #[default]
    Empty,
    Rows(Vec<DetailRow>),
    Error(String),
}

/// Configured chords, parsed once.
#[derive(Debug, Clone, Default)]
pub struct Chords {
    pub toggle_focus: Option<KeyChord>,
    pub refresh: Option<KeyChord>,
    pub delete: Option<KeyChord>,
    pub quit: Option<KeyChord>,
}

/// Main application state container.
///
/// Holds all mutable state for the TUI application. Methods are
/// split across input/ (event handling) and render/ (UI drawing).
/// Generic over the terminal host so the controller runs in tests
/// without a tty.
pub struct App<H: TerminalHost> {
    pub focus: Focus,
    pub command_active: bool,
    pub command_input: String,
    pub output: Option<String>,
    pub navigator: Navigator,
    pub details: Details,
    pub details_path: Option<PathBuf>,
    pub git_log: Vec<LogEntry>,
    pub git_log_tx: Sender<LogRequest>,
    pub shell: Option<ShellSession>,
    pub shell_seq: u64,
    pub shell_area: Option<Rect>,
    pub handoff: EditorHandoff<H>,
    pub input_gate: Arc<InputGate>,
    pub confirm: Option<ConfirmDelete>,
    pub command_overlay: CommandOverlay,
    pub config: Config,
    pub chords: Chords,
    pub event_tx: Sender<AppEvent>,
    pub should_quit: bool,
    pub refresh_requested: bool,
    /// Set when the terminal could not be restored; ends the main loop.
    pub fatal: Option<TerminalError>,
}

pub const OUTPUT_MAX_LINES: usize = 6;
pub const BOTTOM_HORIZONTAL_PADDING: u16 = 1;

impl<H: TerminalHost> App<H> {
    /// Build the app over `start_dir`. An unreadable start directory is
    /// the only error.
    pub fn new(
        config: Config,
        start_dir: &Path,
        host: H,
        event_tx: Sender<AppEvent>,
        input_gate: Arc<InputGate>,
    ) -> Result<Self, BrowseError> {
        let options = ListOptions {
            show_hidden: config.browser.show_hidden,
            parent_link: config.browser.parent_link,
        };
        let navigator = Navigator::open(start_dir, options)?;
        let chords = Chords {
            toggle_focus: parse_key_chord(&config.keymap.toggle_focus),
            refresh: parse_key_chord(&config.keymap.refresh),
            delete: parse_key_chord(&config.keymap.delete),
            quit: parse_key_chord(&config.keymap.quit),
        };
        for (name, chord, raw) in [
            ("toggle_focus", &chords.toggle_focus, &config.keymap.toggle_focus),
            ("refresh", &chords.refresh, &config.keymap.refresh),
            ("delete", &chords.delete, &config.keymap.delete),
            ("quit", &chords.quit, &config.keymap.quit),
        ] {
            if chord.is_none() {
                tracing::warn!(binding = name, value = %raw, "unparseable key chord, binding disabled");
            }
        }
        let git_log_tx = spawn_log_worker(event_tx.clone());

        let mut app = Self {
            focus: Focus::Browser,
            command_active: false,
            command_input: String::new(),
            output: None,
            navigator,
            details: Details::Empty,
            details_path: None,
            git_log: Vec::new(),
            git_log_tx,
            shell: None,
            shell_seq: 0,
            shell_area: None,
            handoff: EditorHandoff::new(TerminalGuard::new(host)),
            input_gate,
            confirm: None,
            command_overlay: CommandOverlay::default(),
            config,
            chords,
            event_tx,
            should_quit: false,
            refresh_requested: false,
            fatal: None,
        };
        app.sync_selection();
        Ok(app)
    }

    /// Set the output message shown above the command bar.
    pub fn set_output(&mut self, message: impl Into<String>) {
        let message = message.into();
        let trimmed = message.trim();
        if trimmed.is_empty() {
            self.output = None;
        } else {
            self.output = Some(trimmed.to_string());
        }
    }

    /// Recompute details for the selected entry and ask for its history.
    ///
    /// Cheap when the selection did not move.
    pub fn sync_selection(&mut self) {
        let path = self.navigator.view().selected_path();
        if path == self.details_path {
            return;
        }
        self.details_path = path.clone();
        self.git_log.clear();
        let (Some(path), Some(entry)) = (path, self.navigator.view().selected()) else {
            self.details = Details::Empty;
            return;
        };
        self.details = match describe(&path, entry) {
            Ok(rows) => Details::Rows(rows),
            Err(err) => Details::Error(err.to_string()),
        };
        let request = LogRequest {
            path,
            limit: self.config.git.log_limit,
        };
        if self.git_log_tx.send(request).is_err() {
            tracing::debug!("git log worker gone");
        }
    }

    /// Force details to be recomputed, e.g. after the file changed.
    pub fn invalidate_details(&mut self) {
        self.details_path = None;
        self.sync_selection();
    }

    /// Re-list the directory; failures go to the output area.
    pub fn refresh_listing(&mut self) {
        if let Err(err) = self.navigator.refresh() {
            self.set_output(err.to_string());
        }
        self.invalidate_details();
    }

    pub fn shell_alive(&self) -> bool {
        self.shell.as_ref().is_some_and(ShellSession::is_alive)
    }
}

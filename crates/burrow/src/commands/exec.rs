//! Command execution handlers.
//!
//! Filesystem commands run directly against the navigator and re-list on
//! success. Commands that touch app-level state (shell, redraw, exit)
//! return an `AppAction` for the controller to carry out. Nothing here
//! fails past the status line: every error becomes a message.

use std::path::Path;
use std::process::Command;

use crate::browser::{create_directory, create_file, BrowseError, Navigator};

use super::parse::CommandInvocation;
use super::registry::command_help_lines;

/// Work a command hands back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Show `message` verbatim in a scrollable overlay.
    ShowText { title: String },
    StartShell,
    Refresh,
    Quit,
}

/// Result of command execution.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub ok: bool,
    pub message: String,
    pub action: Option<AppAction>,
}

impl CommandResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            action: None,
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            action: None,
        }
    }

    fn action(action: AppAction) -> Self {
        Self {
            ok: true,
            message: String::new(),
            action: Some(action),
        }
    }
}

/// Dispatch and execute a parsed command.
pub fn run_command(cmd: &CommandInvocation, navigator: &mut Navigator) -> CommandResult {
    tracing::debug!(verb = %cmd.verb, args = ?cmd.args, "running command");
    match cmd.verb.as_str() {
        "mkdir" => create_entry(cmd, navigator, "mkdir", create_directory),
        "touch" => create_entry(cmd, navigator, "touch", create_file),
        "ls" => list_directory(&cmd.args, navigator.current_dir()),
        "shell" => CommandResult::action(AppAction::StartShell),
        "refresh" => CommandResult::action(AppAction::Refresh),
        "quit" | "q" => CommandResult::action(AppAction::Quit),
        "help" => CommandResult {
            ok: true,
            message: command_help_lines().join("\n"),
            action: Some(AppAction::ShowText {
                title: "help".to_string(),
            }),
        },
        other => CommandResult::failed(format!("Unknown command: {other}")),
    }
}

fn create_entry(
    cmd: &CommandInvocation,
    navigator: &mut Navigator,
    verb: &str,
    create: fn(&Path, &str) -> Result<std::path::PathBuf, BrowseError>,
) -> CommandResult {
    let [name] = cmd.args.as_slice() else {
        return CommandResult::failed(format!("Usage: {verb} <name>"));
    };
    let created = match create(navigator.current_dir(), name) {
        Ok(path) => path,
        Err(err) => {
            tracing::info!(verb, name = %name, error = %err, "create failed");
            return CommandResult::failed(err.to_string());
        }
    };
    tracing::info!(path = %created.display(), "created entry");
    if let Err(err) = navigator.refresh() {
        return CommandResult::failed(err.to_string());
    }
    navigator.select_name(name);
    CommandResult::ok(format!("Created {name}"))
}

fn list_directory(args: &[String], cwd: &Path) -> CommandResult {
    let output = match Command::new("ls").args(args).current_dir(cwd).output() {
        Ok(output) => output,
        Err(err) => return CommandResult::failed(format!("ls: {err}")),
    };
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    let title = if args.is_empty() {
        "ls".to_string()
    } else {
        format!("ls {}", args.join(" "))
    };
    CommandResult {
        ok: output.status.success(),
        message: text,
        action: Some(AppAction::ShowText { title }),
    }
}

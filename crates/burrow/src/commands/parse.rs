//! Command parsing and completion.
//!
//! Handles tokenizing command input, validating the verb,
//! and providing tab-completion suggestions.

use thiserror::Error;

use super::registry::{is_known, COMMANDS};

/// One parsed line of command text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub verb: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0}")]
    Unknown(String),
}

/// Split a line into a verb and its arguments.
pub fn parse_command(input: &str) -> Result<CommandInvocation, CommandError> {
    let trimmed = input.trim();
    let body = trimmed.strip_prefix(':').unwrap_or(trimmed);
    let mut tokens = body.split_whitespace();
    let Some(verb) = tokens.next() else {
        return Err(CommandError::Empty);
    };
    if !is_known(verb) {
        return Err(CommandError::Unknown(verb.to_string()));
    }
    Ok(CommandInvocation {
        verb: verb.to_string(),
        args: tokens.map(str::to_string).collect(),
    })
}

/// Complete the verb being typed.
///
/// Returns the unique completion followed by a space, or the longest
/// common prefix of several candidates. `None` when nothing would change.
pub fn complete_command_input(input: &str) -> Option<String> {
    let colon = input.trim_start().starts_with(':');
    let trimmed = input.trim_start();
    let body = trimmed.strip_prefix(':').unwrap_or(trimmed);
    if body.is_empty() || body.contains(char::is_whitespace) {
        return None;
    }

    let candidates: Vec<&str> = COMMANDS
        .iter()
        .map(|spec| spec.name)
        .filter(|name| name.starts_with(body))
        .collect();
    let first = candidates.first()?;
    let common = candidates
        .iter()
        .skip(1)
        .fold(first.to_string(), |prefix, name| common_prefix(&prefix, name));
    if common.len() <= body.len() && candidates.len() > 1 {
        return None;
    }

    let mut completed = if colon {
        format!(":{common}")
    } else {
        common.clone()
    };
    if candidates.len() == 1 {
        completed.push(' ');
    }
    Some(completed)
}

fn common_prefix(a: &str, b: &str) -> String {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(x, _)| x)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{complete_command_input, parse_command, CommandError};

    #[test]
    fn parse_rejects_empty_input() {
        assert_eq!(parse_command(""), Err(CommandError::Empty));
        assert_eq!(parse_command("  :  "), Err(CommandError::Empty));
    }

    #[test]
    fn parse_reports_unknown_verb() {
        let err = parse_command(":wut now").unwrap_err();
        assert_eq!(err.to_string(), "Unknown command: wut");
    }

    #[test]
    fn parse_splits_verb_and_args() {
        let cmd = parse_command(":ls -la  /tmp").expect("parse ok");
        assert_eq!(cmd.verb, "ls");
        assert_eq!(cmd.args, vec!["-la".to_string(), "/tmp".to_string()]);
    }

    #[test]
    fn parse_accepts_missing_colon_and_whitespace() {
        let cmd = parse_command("  mkdir   docs ").expect("parse ok");
        assert_eq!(cmd.verb, "mkdir");
        assert_eq!(cmd.args, vec!["docs".to_string()]);
    }

    #[test]
    fn complete_unique_verb() {
        assert_eq!(complete_command_input(":mk").as_deref(), Some(":mkdir "));
        assert_eq!(complete_command_input("to").as_deref(), Some("touch "));
    }

    #[test]
    fn complete_common_prefix() {
        // "quit" and "q" share only "q".
        assert_eq!(complete_command_input(":q"), None);
        assert_eq!(complete_command_input(":qu").as_deref(), Some(":quit "));
    }

    #[test]
    fn complete_ignores_arguments() {
        assert!(complete_command_input(":mkdir fo").is_none());
        assert!(complete_command_input(":").is_none());
        assert!(complete_command_input(":zz").is_none());
    }
}

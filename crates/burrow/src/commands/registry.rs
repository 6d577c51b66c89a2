//! Command registry and metadata.
//!
//! Defines all available commands with their usage and descriptions.
//! Used for parsing validation, autocompletion, and help display.

/// Specification for a single command.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "mkdir",
        usage: "mkdir <name>",
        description: "Create a directory here",
    },
    CommandSpec {
        name: "touch",
        usage: "touch <name>",
        description: "Create an empty file here",
    },
    CommandSpec {
        name: "ls",
        usage: "ls [args]",
        description: "Run ls in the current directory",
    },
    CommandSpec {
        name: "shell",
        usage: "shell",
        description: "Start the embedded shell (restarts it if it exited)",
    },
    CommandSpec {
        name: "refresh",
        usage: "refresh",
        description: "Re-read the directory and redraw",
    },
    CommandSpec {
        name: "help",
        usage: "help",
        description: "Show available commands",
    },
    CommandSpec {
        name: "quit",
        usage: "quit",
        description: "Exit burrow",
    },
    CommandSpec {
        name: "q",
        usage: "q",
        description: "Exit burrow",
    },
];

pub(crate) fn is_known(verb: &str) -> bool {
    COMMANDS.iter().any(|spec| spec.name == verb)
}

pub fn command_help_lines() -> Vec<String> {
    let width = COMMANDS
        .iter()
        .map(|spec| spec.usage.len())
        .max()
        .unwrap_or(0);
    let mut lines = vec!["Commands:".to_string()];
    lines.extend(COMMANDS.iter().map(|spec| {
        format!(
            "  :{:<width$}  {}",
            spec.usage,
            spec.description,
            width = width
        )
    }));
    lines
}

/// Commands whose name starts with the verb typed so far.
///
/// Empty once arguments are being typed.
pub fn command_hint_lines(input: &str) -> Vec<String> {
    let trimmed = input.trim_start();
    let body = trimmed.strip_prefix(':').unwrap_or(trimmed);
    if body.contains(char::is_whitespace) {
        return Vec::new();
    }
    COMMANDS
        .iter()
        .filter(|spec| spec.name.starts_with(body))
        .map(|spec| format!(":{}  {}", spec.usage, spec.description))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{command_help_lines, command_hint_lines, is_known, COMMANDS};

    #[test]
    fn help_lists_every_command() {
        let lines = command_help_lines();
        assert_eq!(lines.len(), COMMANDS.len() + 1);
        assert!(lines.iter().any(|line| line.contains(":mkdir <name>")));
    }

    #[test]
    fn hints_filter_by_prefix() {
        let hints = command_hint_lines(":t");
        assert_eq!(hints.len(), 1);
        assert!(hints[0].starts_with(":touch"));
        assert!(command_hint_lines(":mkdir foo").is_empty());
        assert_eq!(command_hint_lines(":").len(), COMMANDS.len());
    }

    #[test]
    fn known_verbs() {
        assert!(is_known("ls"));
        assert!(!is_known("rm"));
    }
}

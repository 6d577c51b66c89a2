//! Git command execution for the details pane.
//!
//! All git operations go through `run_git`, which captures stdout,
//! stderr and the exit code. Git is optional: outside a repository, or
//! without a `git` binary, history lookups return nothing.

mod worker;

use std::path::Path;
use std::process::Command;

pub(crate) use worker::{spawn_log_worker, LogRequest};

#[derive(Debug, Clone)]
pub struct ExecResult {
    pub ok: bool,
    pub stdout: String,
    pub stderr: String,
}

pub fn run_git(args: &[&str], cwd: &Path) -> ExecResult {
    let output = Command::new("git").args(args).current_dir(cwd).output();
    match output {
        Ok(out) => ExecResult {
            ok: out.status.success(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        },
        Err(err) => ExecResult {
            ok: false,
            stdout: String::new(),
            stderr: err.to_string(),
        },
    }
}

/// One commit line from `git log --oneline`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub hash: String,
    pub summary: String,
}

/// The last `limit` commits touching `path`, newest first.
pub fn file_log(path: &Path, limit: usize) -> Vec<LogEntry> {
    if limit == 0 {
        return Vec::new();
    }
    let cwd = if path.is_dir() {
        path
    } else {
        match path.parent() {
            Some(parent) => parent,
            None => return Vec::new(),
        }
    };
    let Some(target) = path.to_str() else {
        return Vec::new();
    };
    let limit = limit.to_string();
    let result = run_git(
        &["log", "-n", &limit, "--oneline", "--no-decorate", "--no-color", "--", target],
        cwd,
    );
    if !result.ok {
        tracing::trace!(path = %path.display(), stderr = %result.stderr.trim(), "no git history");
        return Vec::new();
    }
    parse_log(&result.stdout)
}

fn parse_log(output: &str) -> Vec<LogEntry> {
    output
        .lines()
        .filter_map(|line| {
            let (hash, summary) = line.trim_end().split_once(' ')?;
            Some(LogEntry {
                hash: hash.to_string(),
                summary: summary.to_string(),
            })
        })
        .collect()
}

//! Configuration loading and merging.
//!
//! Config is loaded from two sources with the directory file taking
//! precedence, field by field:
//! 1. User-level: `~/.burrow/config.toml`
//! 2. Directory-level: `<start dir>/.burrow/config.toml`
//!
//! Missing, empty or malformed files fall back to defaults. Editor and
//! shell commands not set in either file are taken from the environment.

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::terminal::DEFAULT_SCROLLBACK_BYTES;

const CONFIG_DIR: &str = ".burrow";
const DEFAULT_TOGGLE_FOCUS: &str = "ctrl+g";
const DEFAULT_REFRESH: &str = "ctrl+r";
const DEFAULT_DELETE: &str = "d";
const DEFAULT_QUIT: &str = "q";
const DEFAULT_EDITOR: &str = "vim";
const DEFAULT_SHELL: &str = "/bin/sh";
const DEFAULT_LOG_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub keymap: KeymapConfig,
    pub editor: EditorConfig,
    pub shell: ShellConfig,
    pub browser: BrowserConfig,
    pub git: GitConfig,
}

#[derive(Debug, Clone)]
pub struct KeymapConfig {
    pub toggle_focus: String,
    pub refresh: String,
    pub delete: String,
    pub quit: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub command: String,
    /// Placed before the file path.
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub command: String,
    pub args: Vec<String>,
    pub autostart: bool,
    pub scrollback_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub show_hidden: bool,
    pub parent_link: bool,
}

#[derive(Debug, Clone)]
pub struct GitConfig {
    pub log_limit: usize,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    keymap: Option<RawKeymap>,
    editor: Option<RawCommand>,
    shell: Option<RawShell>,
    browser: Option<RawBrowser>,
    git: Option<RawGit>,
}

#[derive(Debug, Default, Deserialize)]
struct RawKeymap {
    #[serde(alias = "toggleFocus")]
    toggle_focus: Option<String>,
    #[serde(alias = "refreshUi")]
    refresh: Option<String>,
    delete: Option<String>,
    quit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCommand {
    command: Option<String>,
    args: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawShell {
    command: Option<String>,
    args: Option<Vec<String>>,
    autostart: Option<bool>,
    #[serde(alias = "scrollbackBytes")]
    scrollback_bytes: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct RawBrowser {
    #[serde(alias = "showHidden")]
    show_hidden: Option<bool>,
    #[serde(alias = "parentLink")]
    parent_link: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RawGit {
    #[serde(alias = "logLimit")]
    log_limit: Option<usize>,
}

fn read_toml(path: &Path) -> Option<RawConfig> {
    let contents = fs::read_to_string(path).ok()?;
    if contents.trim().is_empty() {
        return None;
    }
    match toml::from_str::<RawConfig>(&contents) {
        Ok(raw) => Some(raw),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring malformed config");
            None
        }
    }
}

/// First value found, directory config before user config.
fn pick<S, T>(
    dir: Option<&RawConfig>,
    user: Option<&RawConfig>,
    section: impl Fn(&RawConfig) -> Option<&S>,
    field: impl Fn(&S) -> Option<T>,
) -> Option<T> {
    dir.and_then(&section)
        .and_then(&field)
        .or_else(|| user.and_then(&section).and_then(&field))
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn keymap(c: &RawConfig) -> Option<&RawKeymap> {
    c.keymap.as_ref()
}

fn editor(c: &RawConfig) -> Option<&RawCommand> {
    c.editor.as_ref()
}

fn shell(c: &RawConfig) -> Option<&RawShell> {
    c.shell.as_ref()
}

fn browser(c: &RawConfig) -> Option<&RawBrowser> {
    c.browser.as_ref()
}

fn git(c: &RawConfig) -> Option<&RawGit> {
    c.git.as_ref()
}

fn merge_config(user: Option<RawConfig>, dir: Option<RawConfig>) -> Config {
    let (dir, user) = (dir.as_ref(), user.as_ref());
    let keymap = KeymapConfig {
        toggle_focus: pick(dir, user, keymap, |k| k.toggle_focus.clone())
            .unwrap_or_else(|| DEFAULT_TOGGLE_FOCUS.to_string()),
        refresh: pick(dir, user, keymap, |k| k.refresh.clone())
            .unwrap_or_else(|| DEFAULT_REFRESH.to_string()),
        delete: pick(dir, user, keymap, |k| k.delete.clone())
            .unwrap_or_else(|| DEFAULT_DELETE.to_string()),
        quit: pick(dir, user, keymap, |k| k.quit.clone())
            .unwrap_or_else(|| DEFAULT_QUIT.to_string()),
    };

    let editor = EditorConfig {
        command: pick(dir, user, editor, |e| e.command.clone())
            .or_else(|| non_empty_env("VISUAL"))
            .or_else(|| non_empty_env("EDITOR"))
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string()),
        args: pick(dir, user, editor, |e| e.args.clone()).unwrap_or_default(),
    };

    let shell = ShellConfig {
        command: pick(dir, user, shell, |s| s.command.clone())
            .or_else(|| non_empty_env("SHELL"))
            .unwrap_or_else(|| DEFAULT_SHELL.to_string()),
        args: pick(dir, user, shell, |s| s.args.clone()).unwrap_or_default(),
        autostart: pick(dir, user, shell, |s| s.autostart).unwrap_or(true),
        scrollback_bytes: pick(dir, user, shell, |s| s.scrollback_bytes)
            .unwrap_or(DEFAULT_SCROLLBACK_BYTES),
    };

    let browser = BrowserConfig {
        show_hidden: pick(dir, user, browser, |b| b.show_hidden).unwrap_or(true),
        parent_link: pick(dir, user, browser, |b| b.parent_link).unwrap_or(false),
    };

    let git = GitConfig {
        log_limit: pick(dir, user, git, |g| g.log_limit).unwrap_or(DEFAULT_LOG_LIMIT),
    };

    Config {
        keymap,
        editor,
        shell,
        browser,
        git,
    }
}

fn config_path_from_root(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join("config.toml")
}

pub fn user_config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(config_path_from_root(&home))
}

pub fn dir_config_path(start_dir: &Path) -> PathBuf {
    config_path_from_root(start_dir)
}

pub fn load_config(start_dir: &Path) -> Config {
    let dir_config = read_toml(&dir_config_path(start_dir));
    let user_config = user_config_path().and_then(|path| read_toml(&path));
    let config = merge_config(user_config, dir_config);
    tracing::debug!(
        editor = %config.editor.command,
        shell = %config.shell.command,
        "config loaded"
    );
    config
}

use std::fs;
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

use super::event::{handle_event, handle_key};
use crate::app::gate::InputGate;
use crate::app::handoff::HandoffPhase;
use crate::app::state::{App, Focus};
use crate::config::{BrowserConfig, Config, EditorConfig, GitConfig, KeymapConfig, ShellConfig};
use crate::events::AppEvent;
use crate::git::LogEntry;
use crate::terminal::guard::fake::RecordingHost;

fn test_config() -> Config {
    Config {
        keymap: KeymapConfig {
            toggle_focus: "ctrl+g".to_string(),
            refresh: "ctrl+r".to_string(),
            delete: "d".to_string(),
            quit: "q".to_string(),
        },
        editor: EditorConfig {
            command: "true".to_string(),
            args: Vec::new(),
        },
        shell: ShellConfig {
            command: "/bin/sh".to_string(),
            args: Vec::new(),
            autostart: false,
            scrollback_bytes: 64 * 1024,
        },
        browser: BrowserConfig {
            show_hidden: true,
            parent_link: false,
        },
        git: GitConfig { log_limit: 10 },
    }
}

fn new_app(dir: &Path, config: Config) -> (App<RecordingHost>, Receiver<AppEvent>) {
    let (tx, rx) = mpsc::channel();
    let app = App::new(
        config,
        dir,
        RecordingHost::default(),
        tx,
        Arc::new(InputGate::default()),
    )
    .expect("app");
    (app, rx)
}

/// `/tmp/t`-style fixture: `b.txt`, `a.txt`, `sub/`.
fn fixture() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("b.txt"), "b").expect("write");
    fs::write(dir.path().join("a.txt"), "a").expect("write");
    fs::create_dir(dir.path().join("sub")).expect("mkdir");
    dir
}

fn press(app: &mut App<RecordingHost>, code: KeyCode) {
    handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_line(app: &mut App<RecordingHost>, line: &str) {
    for ch in line.chars() {
        press(app, KeyCode::Char(ch));
    }
    press(app, KeyCode::Enter);
}

fn names(app: &App<RecordingHost>) -> Vec<String> {
    app.navigator
        .view()
        .entries()
        .iter()
        .map(|entry| entry.name().to_string())
        .collect()
}

fn selected(app: &App<RecordingHost>) -> Option<String> {
    app.navigator.view().selected().map(|e| e.name().to_string())
}

#[test]
fn navigation_scenario() {
    let dir = fixture();
    let (mut app, _rx) = new_app(dir.path(), test_config());
    assert_eq!(names(&app), vec!["sub", "a.txt", "b.txt"]);

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.navigator.current_dir(), dir.path().join("sub"));
    assert!(names(&app).is_empty());

    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.navigator.current_dir(), dir.path());
    assert_eq!(selected(&app).as_deref(), Some("sub"));

    type_line(&mut app, ":touch c.txt");
    assert_eq!(names(&app), vec!["sub", "a.txt", "b.txt", "c.txt"]);
}

#[test]
fn selection_keys_clamp() {
    let dir = fixture();
    let (mut app, _rx) = new_app(dir.path(), test_config());
    press(&mut app, KeyCode::Up);
    assert_eq!(selected(&app).as_deref(), Some("sub"));
    press(&mut app, KeyCode::Char('G'));
    assert_eq!(selected(&app).as_deref(), Some("b.txt"));
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(selected(&app).as_deref(), Some("b.txt"));
    press(&mut app, KeyCode::Char('k'));
    assert_eq!(selected(&app).as_deref(), Some("a.txt"));
    press(&mut app, KeyCode::Home);
    assert_eq!(selected(&app).as_deref(), Some("sub"));
}

#[test]
fn details_follow_selection() {
    let dir = fixture();
    let (mut app, _rx) = new_app(dir.path(), test_config());
    press(&mut app, KeyCode::Down);
    assert_eq!(app.details_path, Some(dir.path().join("a.txt")));
    match &app.details {
        crate::app::state::Details::Rows(rows) => {
            assert!(rows.iter().any(|row| row.label == "Name" && row.value == "a.txt"));
        }
        other => panic!("unexpected details: {other:?}"),
    }
}

#[test]
fn stale_git_log_is_dropped() {
    let dir = fixture();
    let (mut app, _rx) = new_app(dir.path(), test_config());
    let entries = vec![LogEntry {
        hash: "abc1234".to_string(),
        summary: "msg".to_string(),
    }];

    handle_event(
        &mut app,
        AppEvent::GitLogUpdated {
            path: dir.path().join("b.txt"),
            entries: entries.clone(),
        },
    );
    assert!(app.git_log.is_empty());

    handle_event(
        &mut app,
        AppEvent::GitLogUpdated {
            path: dir.path().join("sub"),
            entries: entries.clone(),
        },
    );
    assert_eq!(app.git_log, entries);
}

#[test]
fn enter_on_file_hands_off_once_and_refreshes() {
    let dir = fixture();
    let mut config = test_config();
    config.editor = EditorConfig {
        command: "/bin/sh -c".to_string(),
        args: vec!["touch \"$(dirname \"$0\")/made-by-editor\"".to_string()],
    };
    let (mut app, _rx) = new_app(dir.path(), config);
    press(&mut app, KeyCode::Down);

    press(&mut app, KeyCode::Enter);

    let host = app.handoff.guard().host();
    assert_eq!(host.count("capture"), 1);
    assert_eq!(host.count("release"), 1);
    assert_eq!(host.count("restore"), 1);
    assert_eq!(host.count("reclaim"), 1);
    assert_eq!(app.handoff.phase(), HandoffPhase::Idle);
    assert!(!app.input_gate.is_paused());
    assert!(app.refresh_requested);
    assert!(names(&app).contains(&"made-by-editor".to_string()));
    assert_eq!(selected(&app).as_deref(), Some("a.txt"));
}

#[test]
fn editor_failures_are_reported_not_fatal() {
    let dir = fixture();
    let mut config = test_config();
    config.editor.command = "/definitely/missing/editor".to_string();
    let (mut app, _rx) = new_app(dir.path(), config);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert!(app.output.as_deref().is_some_and(|o| o.starts_with("Cannot start")));
    assert_eq!(app.handoff.guard().host().count("restore"), 1);
    assert!(!app.should_quit);

    app.config.editor.command = "false".to_string();
    press(&mut app, KeyCode::Enter);
    assert!(app.output.as_deref().is_some_and(|o| o.contains("exited with")));
    assert!(!app.should_quit);
}

#[test]
fn restore_failure_stops_the_app() {
    let dir = fixture();
    let (mut app, _rx) = new_app(dir.path(), test_config());
    app.handoff.guard().host().fail_restore.set(true);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert!(app.should_quit);
    assert!(app.fatal.as_ref().is_some_and(|err| err.is_fatal()));
}

#[test]
fn command_errors_go_to_output() {
    let dir = fixture();
    let (mut app, _rx) = new_app(dir.path(), test_config());
    press(&mut app, KeyCode::Char(':'));
    assert!(app.command_active);
    type_line(&mut app, "wut");
    assert!(!app.command_active);
    assert_eq!(app.output.as_deref(), Some("Unknown command: wut"));

    press(&mut app, KeyCode::Char(':'));
    type_line(&mut app, "mkdir sub");
    assert!(app.output.as_deref().is_some_and(|o| o.contains("already exists")));
    assert_eq!(names(&app).len(), 3);
}

#[test]
fn command_escape_and_completion() {
    let dir = fixture();
    let (mut app, _rx) = new_app(dir.path(), test_config());
    press(&mut app, KeyCode::Char(':'));
    press(&mut app, KeyCode::Char('t'));
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.command_input, ":touch ");
    press(&mut app, KeyCode::Esc);
    assert!(!app.command_active);
    assert!(app.command_input.is_empty());
}

#[test]
fn delete_requires_confirmation() {
    let dir = fixture();
    let (mut app, _rx) = new_app(dir.path(), test_config());
    press(&mut app, KeyCode::Char('G'));

    press(&mut app, KeyCode::Char('d'));
    assert!(app.confirm.is_some());
    press(&mut app, KeyCode::Char('n'));
    assert!(app.confirm.is_none());
    assert!(dir.path().join("b.txt").exists());

    press(&mut app, KeyCode::Delete);
    press(&mut app, KeyCode::Char('y'));
    assert!(!dir.path().join("b.txt").exists());
    assert_eq!(names(&app), vec!["sub", "a.txt"]);
    assert_eq!(selected(&app).as_deref(), Some("a.txt"));
    assert_eq!(app.output.as_deref(), Some("Deleted b.txt"));
}

#[test]
fn delete_removes_the_confirmed_entry_even_if_selection_moved() {
    let dir = fixture();
    let (mut app, _rx) = new_app(dir.path(), test_config());
    press(&mut app, KeyCode::Char('G'));
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(app.confirm.as_ref().map(|c| c.name.as_str()), Some("b.txt"));

    app.navigator.select_first();
    press(&mut app, KeyCode::Char('y'));
    assert!(!dir.path().join("b.txt").exists());
    assert!(dir.path().join("sub").is_dir());
    assert_eq!(app.output.as_deref(), Some("Deleted b.txt"));
}

#[test]
fn delete_of_non_utf8_name_removes_the_real_file() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().expect("temp dir");
    let raw = dir.path().join(OsStr::from_bytes(b"bad\xff.txt"));
    fs::write(&raw, "x").expect("write");
    let (mut app, _rx) = new_app(dir.path(), test_config());

    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('y'));
    assert!(!raw.exists());
    assert!(names(&app).is_empty());
}

#[test]
fn ls_opens_overlay() {
    let dir = fixture();
    let (mut app, _rx) = new_app(dir.path(), test_config());
    press(&mut app, KeyCode::Char(':'));
    type_line(&mut app, "ls");
    assert!(app.command_overlay.visible);
    assert_eq!(app.command_overlay.output, "a.txt\nb.txt\nsub\n");

    // Keys go to the overlay, not the browser.
    press(&mut app, KeyCode::Char('q'));
    assert!(!app.command_overlay.visible);
    assert!(!app.should_quit);
}

#[test]
fn quit_key_and_command() {
    let dir = fixture();
    let (mut app, _rx) = new_app(dir.path(), test_config());
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);

    let (mut app, _rx) = new_app(dir.path(), test_config());
    press(&mut app, KeyCode::Char(':'));
    type_line(&mut app, "q");
    assert!(app.should_quit);
}

#[test]
fn toggle_without_shell_stays_in_browser() {
    let dir = fixture();
    let (mut app, _rx) = new_app(dir.path(), test_config());
    handle_key(
        &mut app,
        KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL),
    );
    assert_eq!(app.focus, Focus::Browser);
    assert!(app.output.as_deref().is_some_and(|o| o.contains(":shell")));
}

fn wait_for_exit(app: &mut App<RecordingHost>, rx: &Receiver<AppEvent>) -> bool {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if let Ok(event) = rx.recv_timeout(Duration::from_millis(100)) {
            let exited = matches!(event, AppEvent::ShellExit(_));
            handle_event(app, event);
            if exited {
                return true;
            }
        }
    }
    false
}

#[test]
fn shell_focus_forwards_keys_until_exit() {
    let dir = fixture();
    let (mut app, rx) = new_app(dir.path(), test_config());
    press(&mut app, KeyCode::Char(':'));
    type_line(&mut app, "shell");
    assert!(app.shell_alive(), "{:?}", app.output);

    let toggle = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL);
    handle_key(&mut app, toggle);
    assert_eq!(app.focus, Focus::Shell);

    // Browser keys like 'q' and 'j' must reach the shell.
    type_line(&mut app, "echo marker-$((40+2)) jq; exit");
    assert!(!app.should_quit);

    assert!(wait_for_exit(&mut app, &rx), "shell did not exit");
    assert_eq!(app.focus, Focus::Browser);
    assert!(!app.shell_alive());
    let log = app.shell.as_ref().expect("session").log().snapshot();
    assert!(String::from_utf8_lossy(&log).contains("marker-42 jq"));
}

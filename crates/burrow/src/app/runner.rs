//! Application runner and event loop.
//!
//! Handles terminal setup/teardown and the main event loop.
//! Events are read from an mpsc channel and dispatched to handlers.

use std::io;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context};
use crossterm::cursor::Show;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::config::load_config;
use crate::events::AppEvent;
use crate::terminal::{CrosstermHost, TerminalHost};

use super::gate::InputGate;
use super::input::{handle_event, start_shell, sync_shell_size};
use super::render::render;
use super::state::App;

const INPUT_POLL: Duration = Duration::from_millis(50);
const GATE_RETRY: Duration = Duration::from_millis(20);

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

/// Entry point: set up terminal and run the event loop.
pub fn run(start_dir: &Path) -> anyhow::Result<()> {
    let config = load_config(start_dir);
    let gate = Arc::new(InputGate::default());
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();

    let mut app = App::new(
        config,
        start_dir,
        CrosstermHost,
        event_tx.clone(),
        Arc::clone(&gate),
    )
    .with_context(|| format!("cannot open {}", start_dir.display()))?;
    app.handoff
        .guard()
        .capture_state()
        .context("cannot query the terminal")?;

    let mut terminal = setup_terminal().context("cannot set up the terminal")?;
    install_panic_hook();

    let result = spawn_input_thread(event_tx, gate)
        .context("cannot start input thread")
        .and_then(|()| run_loop(&mut terminal, &mut app, &event_rx).map_err(Into::into));

    if let Some(shell) = app.shell.take() {
        shell.close();
    }
    let teardown = restore_terminal(&mut terminal);

    if let Some(err) = app.fatal.take() {
        return Err(anyhow!(err).context("terminal state could not be restored"));
    }
    result?;
    teardown.context("cannot restore the terminal")?;
    tracing::info!("burrow exiting");
    Ok(())
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, Show)?;
    terminal.show_cursor()
}

/// Put the terminal back before the default hook prints the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
        original_hook(panic);
    }));
}

/// Main event loop: process events until quit.
fn run_loop<H: TerminalHost>(
    terminal: &mut Tui,
    app: &mut App<H>,
    event_rx: &Receiver<AppEvent>,
) -> io::Result<()> {
    if app.config.shell.autostart {
        start_shell(app);
    }
    terminal.clear()?;
    terminal.draw(|frame| render(app, frame))?;
    sync_shell_size(app);

    while !app.should_quit {
        let event = match event_rx.recv() {
            Ok(event) => event,
            Err(_) => break,
        };
        handle_event(app, event);
        // Drain any pending events before redraw
        while let Ok(event) = event_rx.try_recv() {
            if app.should_quit {
                break;
            }
            handle_event(app, event);
        }
        if app.should_quit {
            break;
        }

        if app.refresh_requested {
            terminal.clear()?;
            app.refresh_requested = false;
        }

        terminal.draw(|frame| render(app, frame))?;
        sync_shell_size(app);
    }
    Ok(())
}

/// Spawn a thread to read terminal input events.
///
/// Each poll happens under an `InputGate` lease so a foreground child
/// gets every keystroke while the gate is closed.
fn spawn_input_thread(sender: Sender<AppEvent>, gate: Arc<InputGate>) -> io::Result<()> {
    thread::Builder::new()
        .name("input".to_string())
        .spawn(move || loop {
            let Some(_lease) = gate.lease() else {
                thread::sleep(GATE_RETRY);
                continue;
            };
            match event::poll(INPUT_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(err) => {
                    tracing::error!(error = %err, "input poll failed");
                    break;
                }
            }
            let sent = match event::read() {
                Ok(Event::Key(key)) => sender.send(AppEvent::Input(key)),
                Ok(Event::Resize(_, _)) => sender.send(AppEvent::Resize),
                Ok(_) => Ok(()),
                Err(err) => {
                    tracing::error!(error = %err, "input read failed");
                    break;
                }
            };
            if sent.is_err() {
                break;
            }
        })?;
    Ok(())
}

//! Background history lookups.
//!
//! The selection can move faster than git answers, so requests are
//! coalesced: after each wakeup the worker drains the queue and only
//! looks up the newest path. Results carry their path so the app can
//! drop answers for an entry that is no longer selected.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::events::AppEvent;

use super::file_log;

#[derive(Debug)]
pub(crate) struct LogRequest {
    pub path: PathBuf,
    pub limit: usize,
}

pub(crate) fn spawn_log_worker(event_tx: Sender<AppEvent>) -> Sender<LogRequest> {
    let (request_tx, request_rx) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("git-log".to_string())
        .spawn(move || run_log_worker(request_rx, event_tx));
    if let Err(err) = spawned {
        // Requests then go nowhere and the pane shows no history.
        tracing::warn!(error = %err, "cannot start git log worker");
    }
    request_tx
}

fn run_log_worker(request_rx: Receiver<LogRequest>, event_tx: Sender<AppEvent>) {
    while let Ok(mut request) = request_rx.recv() {
        while let Ok(newer) = request_rx.try_recv() {
            request = newer;
        }
        let entries = file_log(&request.path, request.limit);
        if event_tx
            .send(AppEvent::GitLogUpdated {
                path: request.path,
                entries,
            })
            .is_err()
        {
            break;
        }
    }
}

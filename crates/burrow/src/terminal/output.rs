//! Shared byte log between the PTY reader thread and the render path.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const DEFAULT_SCROLLBACK_BYTES: usize = 256 * 1024;

/// Append-ordered byte log with a size bound.
///
/// The reader thread is the only writer. Chunks land in read order under
/// the lock, so a reader sees either all of a chunk or none of it. When
/// the bound is exceeded the oldest bytes go first, cut at a line
/// boundary when one is close.
#[derive(Debug, Clone)]
pub struct OutputLog {
    inner: Arc<Mutex<LogState>>,
}

#[derive(Debug)]
struct LogState {
    bytes: Vec<u8>,
    limit: usize,
}

impl Default for OutputLog {
    fn default() -> Self {
        Self::with_limit(DEFAULT_SCROLLBACK_BYTES)
    }
}

impl OutputLog {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LogState {
                bytes: Vec::new(),
                limit: limit.max(1),
            })),
        }
    }

    pub fn append(&self, chunk: &[u8]) {
        if chunk.is_empty() {
            return;
        }
        let mut state = self.lock();
        state.bytes.extend_from_slice(chunk);
        if state.bytes.len() > state.limit {
            let excess = state.bytes.len() - state.limit;
            let cut = state.bytes[excess..]
                .iter()
                .take(1024)
                .position(|byte| *byte == b'\n')
                .map(|offset| excess + offset + 1)
                .unwrap_or(excess);
            state.bytes.drain(..cut);
        }
    }

    /// Copy of the retained bytes.
    pub fn snapshot(&self) -> Vec<u8> {
        self.lock().bytes.clone()
    }

    fn lock(&self) -> MutexGuard<'_, LogState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

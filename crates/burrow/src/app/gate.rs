//! Pausing the input thread while a foreground child owns the terminal.
//!
//! The input thread takes a lease before every poll. `pause()` closes the
//! gate and waits for any lease in progress, so once it returns no poll
//! is running and none will start until the returned `InputPause` drops.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
pub struct InputGate {
    paused: AtomicBool,
    lease: Mutex<()>,
}

impl InputGate {
    /// Permission to poll once. `None` while paused.
    pub fn lease(&self) -> Option<MutexGuard<'_, ()>> {
        if self.paused.load(Ordering::SeqCst) {
            return None;
        }
        let guard = self.lease.lock().unwrap_or_else(PoisonError::into_inner);
        // pause() may have won the race for the lock.
        if self.paused.load(Ordering::SeqCst) {
            return None;
        }
        Some(guard)
    }

    pub fn pause(&self) -> InputPause<'_> {
        self.paused.store(true, Ordering::SeqCst);
        drop(self.lease.lock().unwrap_or_else(PoisonError::into_inner));
        tracing::trace!("input gate closed");
        InputPause { gate: self }
    }

    #[cfg(test)]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}

/// Reopens the gate on drop.
pub struct InputPause<'a> {
    gate: &'a InputGate,
}

impl Drop for InputPause<'_> {
    fn drop(&mut self) {
        self.gate.paused.store(false, Ordering::SeqCst);
        tracing::trace!("input gate opened");
    }
}

#[cfg(test)]
mod tests {
    use super::InputGate;
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn pause_blocks_leases_until_dropped() {
        let gate = InputGate::default();
        assert!(gate.lease().is_some());
        {
            let _pause = gate.pause();
            assert!(gate.is_paused());
            assert!(gate.lease().is_none());
        }
        assert!(!gate.is_paused());
        assert!(gate.lease().is_some());
    }

    #[test]
    fn pause_waits_for_lease_in_progress() {
        let gate = Arc::new(InputGate::default());
        let (leased_tx, leased_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let worker = {
            let gate = Arc::clone(&gate);
            thread::spawn(move || {
                let lease = gate.lease().expect("lease");
                leased_tx.send(()).expect("signal");
                release_rx.recv().expect("release");
                drop(lease);
            })
        };
        leased_rx.recv().expect("leased");

        let (paused_tx, paused_rx) = mpsc::channel();
        let pauser = {
            let gate = Arc::clone(&gate);
            thread::spawn(move || {
                let _pause = gate.pause();
                paused_tx.send(()).expect("signal");
            })
        };
        assert!(paused_rx.recv_timeout(Duration::from_millis(100)).is_err());
        release_tx.send(()).expect("release");
        paused_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("pause completes after lease ends");

        worker.join().expect("worker");
        pauser.join().expect("pauser");
    }
}

//! Elapsed-time progress line for long solves.
//!
//! A worker thread wakes once a second, prints elapsed/percent to stderr and
//! parks on a condition variable so a stop signal lands within one tick. I/O
//! errors just end the reporter.

use std::io::Write;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

struct ProgressShared {
    stopped: Mutex<bool>,
    signal: Condvar,
}

pub(crate) struct ProgressReporter {
    shared: Arc<ProgressShared>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    pub(crate) fn start(budget_seconds: u64) -> Self {
        let shared = Arc::new(ProgressShared {
            stopped: Mutex::new(false),
            signal: Condvar::new(),
        });
        let worker_shared = Arc::clone(&shared);
        let handle = std::thread::spawn(move || {
            let started = Instant::now();
            let mut stopped = worker_shared.stopped.lock().expect("progress lock");
            while !*stopped {
                let elapsed = started.elapsed().as_secs_f64();
                let percent = if budget_seconds > 0 {
                    (elapsed / budget_seconds as f64 * 100.0).min(100.0)
                } else {
                    0.0
                };
                let mut stderr = std::io::stderr();
                if write!(
                    stderr,
                    "\rProgress: {:5.1}s / {}s ({:4.1}%)",
                    elapsed, budget_seconds, percent
                )
                .and_then(|_| stderr.flush())
                .is_err()
                {
                    return;
                }
                let (guard, _) = worker_shared
                    .signal
                    .wait_timeout(stopped, Duration::from_secs(1))
                    .expect("progress lock");
                stopped = guard;
            }
            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "\r");
            let _ = stderr.flush();
        });
        Self {
            shared,
            handle: Some(handle),
        }
    }

    /// Signal the worker and wait for it to exit.
    pub(crate) fn finish(mut self) {
        *self.shared.stopped.lock().expect("progress lock") = true;
        self.shared.signal.notify_all();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_stops_promptly() {
        let reporter = ProgressReporter::start(60);
        let begun = Instant::now();
        reporter.finish();
        // The worker must observe the stop flag within roughly one tick.
        assert!(begun.elapsed() < Duration::from_secs(3));
    }
}

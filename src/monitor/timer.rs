use super::Monitor;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use log::debug;
use std::io;
use std::sync::Weak;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Repeating timer that runs a detection pass every period.
///
/// Dropping the timer cancels future firings; a pass already running
/// finishes first.
pub(crate) struct PollTimer {
    _cancel: Sender<()>,
    _thread: JoinHandle<()>,
}

impl PollTimer {
    pub(crate) fn spawn(monitor: Weak<Monitor>, period: Duration) -> io::Result<Self> {
        let (cancel, cancelled) = crossbeam_channel::bounded(1);
        let thread = thread::Builder::new()
            .name("scrollstop-monitor".to_string())
            .spawn(move || tick(&monitor, &cancelled, period))?;

        Ok(Self {
            _cancel: cancel,
            _thread: thread,
        })
    }
}

fn tick(monitor: &Weak<Monitor>, cancelled: &Receiver<()>, period: Duration) {
    loop {
        match cancelled.recv_timeout(period) {
            Err(RecvTimeoutError::Timeout) => {
                let Some(monitor) = monitor.upgrade() else {
                    break;
                };
                monitor.run_pass();
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    debug!("Monitor timer stopped");
}

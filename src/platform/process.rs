//! Point-in-time process queries backed by `sysinfo`.

use log::warn;
use std::sync::Mutex;
use sysinfo::{Pid, Process, ProcessRefreshKind, Signal, System, UpdateKind};

pub struct ProcessTable {
    system: Mutex<System>,
    own_pid: Option<Pid>,
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
            own_pid: sysinfo::get_current_pid().ok(),
        }
    }

    /// Whether any process other than this one matches `name`.
    pub fn is_running(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }

        let mut system = self.lock();
        refresh(&mut system);
        system
            .processes()
            .iter()
            .any(|(pid, process)| Some(*pid) != self.own_pid && process_matches(process, &needle))
    }

    /// Send SIGTERM to every process matching `name`.
    /// Returns how many processes accepted the signal.
    pub fn terminate(&self, name: &str) -> usize {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return 0;
        }

        let mut system = self.lock();
        refresh(&mut system);
        system
            .processes()
            .iter()
            .filter(|(pid, process)| Some(**pid) != self.own_pid && process_matches(process, &needle))
            .filter(|(_, process)| process.kill_with(Signal::Term).unwrap_or(false))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, System> {
        match self.system.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("ProcessTable: system mutex was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

/// Command lines are not loaded by a plain process refresh.
fn refresh(system: &mut System) {
    system.refresh_processes_specifics(ProcessRefreshKind::new().with_cmd(UpdateKind::OnlyIfNotSet));
}

/// Matches like `pgrep -f -i`: process name or full command line.
fn process_matches(process: &Process, needle: &str) -> bool {
    if process.name().to_lowercase().contains(needle) {
        return true;
    }
    process
        .cmd()
        .join(" ")
        .to_lowercase()
        .contains(needle)
}

//! Decides whether the host may exit once its windows are gone.

use crate::monitor::Monitor;
use log::info;
use serde::{Deserialize, Serialize};

/// What happens when every window is closed and nothing vetoes the exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuitPolicy {
    /// Keep the process alive so it can be reopened (macOS convention)
    StayResident,
    QuitWhenIdle,
}

impl QuitPolicy {
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::StayResident
        } else {
            Self::QuitWhenIdle
        }
    }
}

impl Default for QuitPolicy {
    fn default() -> Self {
        Self::platform_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VetoReason {
    OverlaysOutstanding(usize),
    MainSurfaceAlive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    Veto(VetoReason),
    StayResident,
    Quit,
}

impl ExitDecision {
    pub fn allows_exit(self) -> bool {
        matches!(self, Self::Quit)
    }
}

pub struct LifecycleGuard {
    policy: QuitPolicy,
}

impl LifecycleGuard {
    pub fn new(policy: QuitPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> QuitPolicy {
        self.policy
    }

    /// Every window has been closed.
    pub fn on_all_surfaces_closed(&self, monitor: &Monitor, main_surface_alive: bool) -> ExitDecision {
        let outstanding = monitor.outstanding_overlays();
        let decision = if outstanding > 0 {
            ExitDecision::Veto(VetoReason::OverlaysOutstanding(outstanding))
        } else if main_surface_alive {
            ExitDecision::Veto(VetoReason::MainSurfaceAlive)
        } else {
            match self.policy {
                QuitPolicy::StayResident => ExitDecision::StayResident,
                QuitPolicy::QuitWhenIdle => ExitDecision::Quit,
            }
        };

        info!("All windows closed: {decision:?}");
        decision
    }

    /// Monitoring state was torn down after the main window closed.
    ///
    /// An exit request raised while overlays were still counted was vetoed
    /// and will not be repeated, so the caller exits itself when this
    /// returns true.
    pub fn exit_after_teardown(&self, monitor: &Monitor, windows_left: usize) -> bool {
        windows_left == 0 && self.on_all_surfaces_closed(monitor, false).allows_exit()
    }

    /// The user brought the app back with no window open. Returns whether
    /// monitoring should resume once the main window is rebuilt.
    pub fn resume_on_reopen(&self, monitor: &Monitor, auto_start: bool) -> bool {
        auto_start && !monitor.is_active()
    }

    /// The host is about to quit.
    pub fn on_before_quit(&self, monitor: &Monitor) {
        monitor.stop();
    }
}

mod timer;

use crate::config::Settings;
use crate::constants::POLL_INTERVAL;
use crate::enforcer;
use crate::error::AppError;
use crate::inspector;
use crate::models::{iso_timestamp, DetectionEvent, OverlayDetails, OverlayId, PatternSet, Target};
use crate::overlay::{OverlayHandle, OverlayHost, PopupManager};
use crate::platform::AutomationBridge;
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use timer::PollTimer;

/// Receives detection notifications for the dashboard.
pub trait DetectionSink: Send + Sync {
    fn short_form_detected(&self, event: &DetectionEvent);
}

pub struct MonitorConfig {
    /// Evaluated in this order on every pass
    pub targets: Vec<Target>,
    pub patterns: PatternSet,
    pub poll_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            targets: Target::defaults(),
            patterns: PatternSet::default(),
            poll_interval: POLL_INTERVAL,
        }
    }
}

impl MonitorConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        let defaults = Self::default();
        Self {
            patterns: defaults.patterns.with_mode(settings.match_mode),
            ..defaults
        }
    }
}

/// Outcome of one detection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// Every target found offending, in evaluation order
    pub detected: Vec<String>,
    /// Offending targets that had no overlay before this pass
    pub newly_detected: Vec<String>,
    pub timestamp: String,
}

/// Owner of all monitoring state: the poll timer and the overlays.
///
/// Passes and command handlers are serialised through the popup manager
/// lock, so two passes never interleave.
pub struct Monitor {
    config: MonitorConfig,
    bridge: Arc<dyn AutomationBridge>,
    sink: Arc<dyn DetectionSink>,
    popups: Mutex<PopupManager>,
    /// Some while monitoring is active
    timer: Mutex<Option<PollTimer>>,
    /// Overlay count readable without waiting on a running pass
    outstanding: AtomicUsize,
}

impl Monitor {
    pub fn new(
        config: MonitorConfig,
        bridge: Arc<dyn AutomationBridge>,
        host: Arc<dyn OverlayHost>,
        sink: Arc<dyn DetectionSink>,
    ) -> Self {
        Self {
            config,
            bridge,
            sink,
            popups: Mutex::new(PopupManager::new(host)),
            timer: Mutex::new(None),
            outstanding: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Run one pass right away, then one every poll interval.
    /// Returns false if monitoring was already active.
    pub fn start(self: &Arc<Self>) -> Result<bool, AppError> {
        {
            let mut timer = self.lock_timer();
            if timer.is_some() {
                debug!("Monitoring already active");
                return Ok(false);
            }

            info!("Starting short-form monitoring");
            *timer = Some(PollTimer::spawn(Arc::downgrade(self), self.config.poll_interval)?);
        }

        // The timer lock is released first so stop() never waits on a pass
        self.run_pass();
        Ok(true)
    }

    /// Cancel future passes. Overlays stay up.
    /// Returns false if monitoring was already stopped.
    pub fn stop(&self) -> bool {
        match self.lock_timer().take() {
            Some(_timer) => {
                info!("Stopped short-form monitoring");
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.lock_timer().is_some()
    }

    /// On-demand pass.
    pub fn check_now(&self) -> PassReport {
        self.run_pass()
    }

    /// The user acknowledged the overlay for `target_name`.
    pub fn dismiss(&self, target_name: &str) -> Result<(), AppError> {
        let mut popups = self.lock_popups();
        let result = popups.dismiss(target_name);
        self.publish(&popups);
        result
    }

    /// The window system reports overlay `id` gone.
    pub fn overlay_destroyed(&self, id: OverlayId) {
        let mut popups = self.lock_popups();
        popups.on_overlay_destroyed(id);
        self.publish(&popups);
    }

    /// The main window is gone: stop polling and drop every overlay.
    pub fn teardown(&self) {
        self.stop();
        let mut popups = self.lock_popups();
        // Exit requests raised by the windows closing below must see zero
        self.outstanding.store(0, Ordering::SeqCst);
        popups.destroy_all();
        self.publish(&popups);
    }

    pub fn outstanding_overlays(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    pub fn overlay(&self, target_name: &str) -> Option<OverlayHandle> {
        self.lock_popups().overlay(target_name).cloned()
    }

    pub fn overlay_names(&self) -> Vec<String> {
        self.lock_popups().target_names()
    }

    pub(crate) fn run_pass(&self) -> PassReport {
        let bridge = self.bridge.as_ref();
        let patterns = &self.config.patterns;
        let mut detected = Vec::new();
        let mut newly_detected = Vec::new();

        {
            let mut popups = self.lock_popups();
            for target in &self.config.targets {
                let name = target.name();

                if inspector::is_offending(bridge, target, patterns) {
                    let is_new = !popups.has_overlay(&name);
                    if is_new {
                        newly_detected.push(name.clone());
                        popups.show_overlay(&name, OverlayDetails::now(target.category()));
                    }
                    if enforcer::enforce(bridge, target, patterns) {
                        info!("Blocked {name}");
                    }
                    detected.push(name);
                } else if popups.clear(&name) {
                    info!("{name} no longer offending, overlay removed");
                }
            }
            self.publish(&popups);
        }

        let timestamp = iso_timestamp(Utc::now());
        if !newly_detected.is_empty() {
            self.sink.short_form_detected(&DetectionEvent {
                apps: newly_detected.clone(),
                timestamp: timestamp.clone(),
            });
        }

        PassReport {
            detected,
            newly_detected,
            timestamp,
        }
    }

    fn publish(&self, popups: &PopupManager) {
        self.outstanding.store(popups.len(), Ordering::SeqCst);
    }

    fn lock_popups(&self) -> MutexGuard<'_, PopupManager> {
        match self.popups.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Monitor: popup mutex was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn lock_timer(&self) -> MutexGuard<'_, Option<PollTimer>> {
        match self.timer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("Monitor: timer mutex was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }
}

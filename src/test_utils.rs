//! Shared test doubles for ScrollStop.
//!
//! The fakes stand in for the operating system and the window system so the
//! monitor can be driven pass by pass.

#![cfg(test)]

use crate::error::AppError;
use crate::models::{DetectionEvent, OverlayId, OverlayRequest};
use crate::monitor::{DetectionSink, Monitor, MonitorConfig};
use crate::overlay::OverlayHost;
use crate::platform::AutomationBridge;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().expect("Test double mutex poisoned")
}

#[derive(Default)]
struct BridgeState {
    running: Vec<String>,
    tabs: HashMap<String, Vec<String>>,
    fail_queries: bool,
    fail_commands: bool,
    queries: usize,
    quit_calls: Vec<String>,
}

/// In-memory process table and browser tabs.
#[derive(Default)]
pub struct FakeBridge {
    state: Mutex<BridgeState>,
}

impl FakeBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn launch(&self, name: &str) {
        lock(&self.state).running.push(name.to_string());
    }

    /// The process exits on its own.
    pub fn exit(&self, name: &str) {
        lock(&self.state).running.retain(|p| p != name);
    }

    pub fn is_launched(&self, name: &str) -> bool {
        lock(&self.state).running.iter().any(|p| p == name)
    }

    pub fn open_tab(&self, browser: &str, url: &str) {
        lock(&self.state)
            .tabs
            .entry(browser.to_string())
            .or_default()
            .push(url.to_string());
    }

    pub fn close_all_tabs(&self, browser: &str) {
        lock(&self.state).tabs.remove(browser);
    }

    pub fn tabs(&self, browser: &str) -> Vec<String> {
        lock(&self.state).tabs.get(browser).cloned().unwrap_or_default()
    }

    pub fn fail_queries(&self, fail: bool) {
        lock(&self.state).fail_queries = fail;
    }

    pub fn fail_commands(&self, fail: bool) {
        lock(&self.state).fail_commands = fail;
    }

    /// Number of process queries answered so far.
    pub fn query_count(&self) -> usize {
        lock(&self.state).queries
    }

    pub fn quit_calls(&self) -> Vec<String> {
        lock(&self.state).quit_calls.clone()
    }
}

impl AutomationBridge for FakeBridge {
    fn is_running(&self, name: &str) -> Result<bool, AppError> {
        let mut state = lock(&self.state);
        state.queries += 1;
        if state.fail_queries {
            return Err(AppError::automation("is running", "query failed"));
        }
        let needle = name.to_lowercase();
        Ok(state
            .running
            .iter()
            .any(|p| p.to_lowercase().contains(&needle)))
    }

    fn list_tabs(&self, browser: &str) -> Result<Vec<String>, AppError> {
        let state = lock(&self.state);
        if state.fail_queries {
            return Err(AppError::automation("list tabs", "not authorized"));
        }
        Ok(state.tabs.get(browser).cloned().unwrap_or_default())
    }

    fn close_tabs(
        &self,
        browser: &str,
        predicate: &dyn Fn(&str) -> bool,
    ) -> Result<usize, AppError> {
        let mut state = lock(&self.state);
        if state.fail_commands {
            return Err(AppError::automation("close tabs", "script error"));
        }
        let Some(tabs) = state.tabs.get_mut(browser) else {
            return Ok(0);
        };
        let before = tabs.len();
        tabs.retain(|url| !predicate(url));
        Ok(before - tabs.len())
    }

    fn quit_app(&self, name: &str) -> Result<(), AppError> {
        let mut state = lock(&self.state);
        if state.fail_commands {
            return Err(AppError::automation("quit app", "script error"));
        }
        state.quit_calls.push(name.to_string());
        state.running.retain(|p| p != name);
        Ok(())
    }
}

#[derive(Default)]
struct HostState {
    main_closed: bool,
    fail_open: bool,
    fail_destroy: bool,
    open: BTreeMap<OverlayId, OverlayRequest>,
    opened: usize,
}

/// Window system that records overlays instead of drawing them.
#[derive(Default)]
pub struct FakeOverlayHost {
    state: Mutex<HostState>,
}

impl FakeOverlayHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close_main_surface(&self) {
        lock(&self.state).main_closed = true;
    }

    pub fn fail_open(&self, fail: bool) {
        lock(&self.state).fail_open = fail;
    }

    pub fn fail_destroy(&self, fail: bool) {
        lock(&self.state).fail_destroy = fail;
    }

    /// Target names of the overlays currently on screen, sorted.
    pub fn open_targets(&self) -> Vec<String> {
        let mut names: Vec<String> = lock(&self.state)
            .open
            .values()
            .map(|r| r.target_name.clone())
            .collect();
        names.sort();
        names
    }

    pub fn request(&self, id: OverlayId) -> Option<OverlayRequest> {
        lock(&self.state).open.get(&id).cloned()
    }

    /// Total overlays ever created.
    pub fn opened_count(&self) -> usize {
        lock(&self.state).opened
    }

    /// The window disappears without the popup manager asking for it.
    pub fn destroy_externally(&self, id: OverlayId) {
        lock(&self.state).open.remove(&id);
    }
}

impl OverlayHost for FakeOverlayHost {
    fn main_surface_alive(&self) -> bool {
        !lock(&self.state).main_closed
    }

    fn open(&self, id: OverlayId, request: &OverlayRequest) -> Result<(), AppError> {
        let mut state = lock(&self.state);
        if state.fail_open {
            return Err(AppError::Window("webview creation failed".to_string()));
        }
        state.open.insert(id, request.clone());
        state.opened += 1;
        Ok(())
    }

    fn destroy(&self, id: OverlayId) -> Result<(), AppError> {
        let mut state = lock(&self.state);
        if state.fail_destroy {
            return Err(AppError::Window("window is busy".to_string()));
        }
        state.open.remove(&id);
        Ok(())
    }

    fn is_destroyed(&self, id: OverlayId) -> bool {
        !lock(&self.state).open.contains_key(&id)
    }
}

/// Collects emitted detection events.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DetectionEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DetectionEvent> {
        lock(&self.events).clone()
    }
}

impl DetectionSink for RecordingSink {
    fn short_form_detected(&self, event: &DetectionEvent) {
        lock(&self.events).push(event.clone());
    }
}

/// Monitor over the given fakes with default targets and patterns.
pub fn monitor_with(
    bridge: &Arc<FakeBridge>,
    host: &Arc<FakeOverlayHost>,
    sink: &Arc<RecordingSink>,
    poll_interval: Duration,
) -> Arc<Monitor> {
    let config = MonitorConfig {
        poll_interval,
        ..MonitorConfig::default()
    };
    let bridge: Arc<dyn AutomationBridge> = Arc::<FakeBridge>::clone(bridge);
    let host: Arc<dyn OverlayHost> = Arc::<FakeOverlayHost>::clone(host);
    let sink: Arc<dyn DetectionSink> = Arc::<RecordingSink>::clone(sink);
    Arc::new(Monitor::new(config, bridge, host, sink))
}

//! Overlay bookkeeping: at most one live overlay per target name.

use crate::error::AppError;
use crate::models::{OverlayDetails, OverlayId, OverlayRequest};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Window system operations the popup manager needs.
pub trait OverlayHost: Send + Sync {
    /// Whether the main window that anchors overlays is alive.
    fn main_surface_alive(&self) -> bool;

    /// Create and show an overlay window.
    fn open(&self, id: OverlayId, request: &OverlayRequest) -> Result<(), AppError>;

    /// Destroy an overlay window, bypassing its close guard.
    fn destroy(&self, id: OverlayId) -> Result<(), AppError>;

    fn is_destroyed(&self, id: OverlayId) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayHandle {
    pub id: OverlayId,
    /// Target name the overlay was created for
    pub target_name: String,
    pub created_at: DateTime<Utc>,
}

pub struct PopupManager {
    host: Arc<dyn OverlayHost>,
    overlays: HashMap<String, OverlayHandle>,
    /// Overlays destroyed by an acknowledgement whose close notification
    /// has not come back from the window system yet
    acknowledgements_in_flight: HashSet<OverlayId>,
    next_id: u64,
}

impl PopupManager {
    pub fn new(host: Arc<dyn OverlayHost>) -> Self {
        Self {
            host,
            overlays: HashMap::new(),
            acknowledgements_in_flight: HashSet::new(),
            next_id: 1,
        }
    }

    /// Show an overlay for `target_name`, replacing any existing one.
    ///
    /// Returns None when there is no main window to own the overlay or the
    /// window could not be created.
    pub fn show_overlay(&mut self, target_name: &str, details: OverlayDetails) -> Option<OverlayHandle> {
        if let Some(existing) = self.overlays.remove(target_name) {
            debug!("Replacing overlay {} for {target_name}", existing.id);
            self.destroy_window(existing.id);
        }

        if !self.host.main_surface_alive() {
            error!("Cannot show overlay for {target_name}: main window not available");
            return None;
        }

        let id = OverlayId::new(self.next_id);
        self.next_id += 1;

        let handle = OverlayHandle {
            id,
            target_name: target_name.to_string(),
            created_at: Utc::now(),
        };
        self.overlays.insert(target_name.to_string(), handle.clone());

        let request = OverlayRequest {
            target_name: target_name.to_string(),
            details,
        };
        if let Err(e) = self.host.open(id, &request) {
            error!("Failed to open overlay for {target_name}: {e}");
            self.overlays.remove(target_name);
            return None;
        }

        info!("Showing overlay {id} for {target_name}");
        Some(handle)
    }

    /// Acknowledge and close the overlay for `target_name`.
    pub fn dismiss(&mut self, target_name: &str) -> Result<(), AppError> {
        let key = if self.overlays.contains_key(target_name) {
            Some(target_name.to_string())
        } else {
            self.overlays
                .iter()
                .find(|(_, handle)| handle.target_name == target_name)
                .map(|(key, _)| key.clone())
        };

        let Some(key) = key else {
            warn!("No overlay to dismiss for {target_name}");
            return Err(AppError::NotFound { entity: "Overlay" });
        };

        let Some(handle) = self.overlays.remove(&key) else {
            return Err(AppError::NotFound { entity: "Overlay" });
        };

        if self.host.is_destroyed(handle.id) {
            warn!("Overlay {} for {target_name} was already destroyed", handle.id);
            return Err(AppError::NotFound { entity: "Overlay" });
        }

        if let Err(e) = self.host.destroy(handle.id) {
            warn!("Failed to destroy overlay {} for {target_name}: {e}", handle.id);
            self.overlays.insert(key, handle);
            return Err(e);
        }

        let shown_for = Utc::now() - handle.created_at;
        info!(
            "Overlay {} for {target_name} acknowledged after {}s",
            handle.id,
            shown_for.num_seconds()
        );
        self.acknowledgements_in_flight.insert(handle.id);
        Ok(())
    }

    /// Remove and destroy the overlay for `target_name`, if any.
    /// Returns whether an overlay was removed.
    pub fn clear(&mut self, target_name: &str) -> bool {
        match self.overlays.remove(target_name) {
            Some(handle) => {
                info!("Clearing overlay {} for {target_name}", handle.id);
                self.destroy_window(handle.id);
                true
            }
            None => false,
        }
    }

    /// Unregister and destroy every overlay.
    pub fn destroy_all(&mut self) {
        for (target_name, handle) in self.overlays.drain() {
            debug!("Destroying overlay {} for {target_name}", handle.id);
            if let Err(e) = self.host.destroy(handle.id) {
                warn!("Failed to destroy overlay {}: {e}", handle.id);
            }
        }
        self.acknowledgements_in_flight.clear();
    }

    /// Teardown path for window system notifications: the window behind
    /// `id` is gone, for whatever reason.
    pub fn on_overlay_destroyed(&mut self, id: OverlayId) {
        if self.acknowledgements_in_flight.remove(&id) {
            debug!("Acknowledged overlay {id} closed");
            return;
        }

        let key = self
            .overlays
            .iter()
            .find(|(_, handle)| handle.id == id)
            .map(|(key, _)| key.clone());

        if let Some(key) = key {
            info!("Overlay {id} for {key} closed outside the monitor");
            self.overlays.remove(&key);
        }
    }

    pub fn has_overlay(&self, target_name: &str) -> bool {
        self.overlays.contains_key(target_name)
    }

    pub fn overlay(&self, target_name: &str) -> Option<&OverlayHandle> {
        self.overlays.get(target_name)
    }

    pub fn target_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.overlays.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn acknowledgements_in_flight(&self) -> usize {
        self.acknowledgements_in_flight.len()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    fn destroy_window(&self, id: OverlayId) {
        if let Err(e) = self.host.destroy(id) {
            warn!("Failed to destroy overlay {id}: {e}");
        }
    }
}

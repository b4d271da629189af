use crate::constants::OVERLAY_LABEL_PREFIX;
use crate::models::TargetCategory;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;

/// Format a point in time the way the dashboard expects (`2024-05-01T12:00:00.000Z`).
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Identifier of one overlay window, unique for the lifetime of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl OverlayId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Window label used by the window system.
    pub fn label(self) -> String {
        format!("{OVERLAY_LABEL_PREFIX}{}", self.0)
    }

    /// Parse a window label back into an overlay id.
    /// Returns None for windows that are not overlays.
    pub fn from_label(label: &str) -> Option<Self> {
        label
            .strip_prefix(OVERLAY_LABEL_PREFIX)?
            .parse()
            .ok()
            .map(Self)
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayDetails {
    pub timestamp: String,
    pub category: TargetCategory,
}

impl OverlayDetails {
    pub fn now(category: TargetCategory) -> Self {
        Self {
            timestamp: iso_timestamp(Utc::now()),
            category,
        }
    }
}

/// Parameters handed to the overlay page when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayRequest {
    pub target_name: String,
    pub details: OverlayDetails,
}

/// Payload of the `short-form-detected` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionEvent {
    pub apps: Vec<String>,
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_label_round_trip() {
        let id = OverlayId::new(7);
        assert_eq!(id.label(), "overlay-7");
        assert_eq!(OverlayId::from_label("overlay-7"), Some(id));
    }

    #[test]
    fn test_from_label_rejects_other_windows() {
        assert_eq!(OverlayId::from_label("main"), None);
        assert_eq!(OverlayId::from_label("overlay-"), None);
        assert_eq!(OverlayId::from_label("overlay-x"), None);
    }

    #[test]
    fn test_iso_timestamp_format() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap();
        assert_eq!(iso_timestamp(at), "2024-05-01T12:30:05.000Z");
    }

    #[test]
    fn test_overlay_request_serializes_camel_case() {
        let request = OverlayRequest {
            target_name: "TikTok".to_string(),
            details: OverlayDetails {
                timestamp: "2024-05-01T12:30:05.000Z".to_string(),
                category: TargetCategory::App,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["targetName"], "TikTok");
        assert_eq!(json["details"]["category"], "app");
    }
}

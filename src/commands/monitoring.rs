use crate::error::AppError;
use crate::monitor::Monitor;
use crate::validation::validate_target_name;
use log::{debug, warn};
use std::sync::Arc;

use super::{CheckResponse, DismissResponse, MonitoringResponse};

pub fn start_monitoring(monitor: &Arc<Monitor>) -> Result<MonitoringResponse, AppError> {
    monitor.start()?;
    Ok(MonitoringResponse { monitoring: true })
}

pub fn stop_monitoring(monitor: &Monitor) -> MonitoringResponse {
    monitor.stop();
    MonitoringResponse { monitoring: false }
}

pub fn get_monitoring_status(monitor: &Monitor) -> MonitoringResponse {
    MonitoringResponse {
        monitoring: monitor.is_active(),
    }
}

pub fn check_apps_now(monitor: &Monitor) -> CheckResponse {
    let report = monitor.check_now();
    debug!("On-demand check found {:?}", report.detected);
    CheckResponse {
        detected: report.detected,
        timestamp: report.timestamp,
    }
}

/// Acknowledge an overlay. Failures are reported in the response rather than
/// as an IPC error so the overlay page can show them.
pub fn dismiss_overlay(monitor: &Monitor, target_name: &str) -> DismissResponse {
    let result = validate_target_name(target_name).and_then(|name| monitor.dismiss(name));
    match result {
        Ok(()) => DismissResponse::ok(),
        Err(e) => {
            warn!("Dismiss for {target_name:?} failed: {e}");
            DismissResponse::failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{monitor_with, FakeBridge, FakeOverlayHost, RecordingSink};
    use std::time::Duration;

    fn setup() -> (Arc<FakeBridge>, Arc<FakeOverlayHost>, Arc<Monitor>) {
        let bridge = Arc::new(FakeBridge::new());
        let host = Arc::new(FakeOverlayHost::new());
        let monitor = monitor_with(
            &bridge,
            &host,
            &Arc::new(RecordingSink::new()),
            Duration::from_secs(3600),
        );
        (bridge, host, monitor)
    }

    #[test]
    fn test_start_stop_status() {
        let (_bridge, _host, monitor) = setup();

        assert!(!get_monitoring_status(&monitor).monitoring);
        assert!(start_monitoring(&monitor).unwrap().monitoring);
        assert!(start_monitoring(&monitor).unwrap().monitoring);
        assert!(get_monitoring_status(&monitor).monitoring);

        assert!(!stop_monitoring(&monitor).monitoring);
        assert!(!stop_monitoring(&monitor).monitoring);
        assert!(!get_monitoring_status(&monitor).monitoring);
    }

    #[test]
    fn test_check_reports_every_offender() {
        let (bridge, _host, monitor) = setup();
        bridge.fail_commands(true);
        bridge.launch("TikTok");

        let first = check_apps_now(&monitor);
        let second = check_apps_now(&monitor);

        assert_eq!(first.detected, vec!["TikTok"]);
        assert_eq!(second.detected, vec!["TikTok"]);
        assert!(second.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_dismiss_open_overlay() {
        let (bridge, host, monitor) = setup();
        bridge.fail_commands(true);
        bridge.launch("Instagram");
        check_apps_now(&monitor);

        assert_eq!(dismiss_overlay(&monitor, "Instagram"), DismissResponse::ok());
        assert!(host.open_targets().is_empty());
    }

    #[test]
    fn test_dismiss_trims_target_name() {
        let (bridge, _host, monitor) = setup();
        bridge.fail_commands(true);
        bridge.launch("TikTok");
        check_apps_now(&monitor);

        assert!(dismiss_overlay(&monitor, "  TikTok\n").success);
    }

    #[test]
    fn test_dismiss_missing_overlay_reports_not_found() {
        let (_bridge, _host, monitor) = setup();

        let response = dismiss_overlay(&monitor, "TikTok");

        assert!(!response.success);
        assert!(response.error.unwrap().contains("not found"));
    }

    #[test]
    fn test_dismiss_rejects_blank_name() {
        let (bridge, host, monitor) = setup();
        bridge.fail_commands(true);
        bridge.launch("TikTok");
        check_apps_now(&monitor);

        let response = dismiss_overlay(&monitor, "   ");

        assert!(!response.success);
        assert_eq!(host.open_targets(), vec!["TikTok"]);
    }
}

// Tauri IPC entry points. Each one moves the work off the event loop, since a
// pass may wait on the window system.

use crate::monitor::Monitor;
use std::sync::Arc;
use tauri::State;

use super::{monitoring, CheckResponse, DismissResponse, MonitoringResponse};

async fn off_event_loop<T, F>(monitor: &State<'_, Arc<Monitor>>, f: F) -> Result<T, String>
where
    T: Send + 'static,
    F: FnOnce(&Arc<Monitor>) -> T + Send + 'static,
{
    let monitor = Arc::clone(monitor.inner());
    tauri::async_runtime::spawn_blocking(move || f(&monitor))
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn start_monitoring(monitor: State<'_, Arc<Monitor>>) -> Result<MonitoringResponse, String> {
    off_event_loop(&monitor, monitoring::start_monitoring).await?.map_err(String::from)
}

#[tauri::command]
pub async fn stop_monitoring(monitor: State<'_, Arc<Monitor>>) -> Result<MonitoringResponse, String> {
    off_event_loop(&monitor, |m| monitoring::stop_monitoring(m)).await
}

#[tauri::command]
pub async fn get_monitoring_status(monitor: State<'_, Arc<Monitor>>) -> Result<MonitoringResponse, String> {
    off_event_loop(&monitor, |m| monitoring::get_monitoring_status(m)).await
}

#[tauri::command]
pub async fn check_apps_now(monitor: State<'_, Arc<Monitor>>) -> Result<CheckResponse, String> {
    off_event_loop(&monitor, |m| monitoring::check_apps_now(m)).await
}

#[tauri::command]
pub async fn dismiss_overlay(
    monitor: State<'_, Arc<Monitor>>,
    target_name: String,
) -> Result<DismissResponse, String> {
    off_event_loop(&monitor, move |m| monitoring::dismiss_overlay(m, &target_name)).await
}

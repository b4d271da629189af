//! Tauri glue: overlay windows, the detection event and window lifecycle.
//!
//! Nothing here runs on the event loop while holding monitoring state;
//! anything that needs the popup lock is moved to a blocking worker.

use crate::commands;
use crate::config::Settings;
use crate::constants::{
    DETECTION_EVENT, MAIN_WINDOW_LABEL, OVERLAY_HEIGHT, OVERLAY_PAGE, OVERLAY_WIDTH,
};
use crate::error::AppError;
use crate::lifecycle::LifecycleGuard;
use crate::models::{DetectionEvent, OverlayId, OverlayRequest};
use crate::monitor::{DetectionSink, Monitor, MonitorConfig};
use crate::overlay::OverlayHost;
use crate::platform::{AutomationBridge, NativeBridge};
use log::{debug, error, info};
use std::sync::Arc;
use tauri::{
    webview::WebviewWindowBuilder, AppHandle, Emitter, Manager, RunEvent, WebviewUrl,
    WebviewWindow, Window, WindowEvent, Wry,
};

pub struct TauriOverlayHost {
    app: AppHandle,
}

impl TauriOverlayHost {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl OverlayHost for TauriOverlayHost {
    fn main_surface_alive(&self) -> bool {
        self.app.get_webview_window(MAIN_WINDOW_LABEL).is_some()
    }

    fn open(&self, id: OverlayId, request: &OverlayRequest) -> Result<(), AppError> {
        let main = self
            .app
            .get_webview_window(MAIN_WINDOW_LABEL)
            .ok_or(AppError::NoMainSurface)?;
        let params = serde_json::to_string(request)?;
        let script = format!("window.__SCROLLSTOP_OVERLAY__ = {params};");

        WebviewWindowBuilder::new(&self.app, id.label(), WebviewUrl::App(OVERLAY_PAGE.into()))
            .title("Short-form content blocked")
            .inner_size(OVERLAY_WIDTH, OVERLAY_HEIGHT)
            .resizable(false)
            .decorations(false)
            .closable(false)
            .minimizable(false)
            .always_on_top(true)
            .visible_on_all_workspaces(true)
            .skip_taskbar(true)
            .center()
            .focused(true)
            .parent(&main)
            .map_err(window_error)?
            .initialization_script(&script)
            .build()
            .map_err(window_error)?;

        debug!("Opened overlay window {}", id.label());
        Ok(())
    }

    fn destroy(&self, id: OverlayId) -> Result<(), AppError> {
        match self.app.get_webview_window(&id.label()) {
            Some(window) => window.destroy().map_err(window_error),
            None => Ok(()),
        }
    }

    fn is_destroyed(&self, id: OverlayId) -> bool {
        self.app.get_webview_window(&id.label()).is_none()
    }
}

fn window_error(e: tauri::Error) -> AppError {
    AppError::Window(e.to_string())
}

/// Sends `short-form-detected` to the dashboard window.
pub struct TauriDetectionSink {
    app: AppHandle,
}

impl TauriDetectionSink {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl DetectionSink for TauriDetectionSink {
    fn short_form_detected(&self, event: &DetectionEvent) {
        if let Err(e) = self.app.emit_to(MAIN_WINDOW_LABEL, DETECTION_EVENT, event) {
            error!("Failed to emit {DETECTION_EVENT}: {e}");
        }
    }
}

pub fn handle_window_event(window: &Window, event: &WindowEvent) {
    let label = window.label();
    let overlay_id = OverlayId::from_label(label);

    if let WindowEvent::CloseRequested { api, .. } = event {
        if overlay_id.is_some() {
            debug!("Ignoring close request for {label}");
            api.prevent_close();
        }
        return;
    }

    if !matches!(event, WindowEvent::Destroyed) {
        return;
    }
    let Some(monitor) = window.try_state::<Arc<Monitor>>() else {
        return;
    };
    let monitor = Arc::clone(monitor.inner());

    if label == MAIN_WINDOW_LABEL {
        info!("Main window closed, tearing down monitoring");
        let app = window.app_handle().clone();
        tauri::async_runtime::spawn_blocking(move || {
            monitor.teardown();
            let windows_left = app.webview_windows().len();
            let exit = app
                .try_state::<LifecycleGuard>()
                .is_some_and(|guard| guard.exit_after_teardown(&monitor, windows_left));
            if exit {
                app.exit(0);
            }
        });
    } else if let Some(id) = overlay_id {
        tauri::async_runtime::spawn_blocking(move || monitor.overlay_destroyed(id));
    }
}

pub fn handle_run_event(app: &AppHandle, event: &RunEvent) {
    let (Some(guard), Some(monitor)) = (
        app.try_state::<LifecycleGuard>(),
        app.try_state::<Arc<Monitor>>(),
    ) else {
        return;
    };

    #[cfg(target_os = "macos")]
    if let RunEvent::Reopen {
        has_visible_windows: false,
        ..
    } = event
    {
        reopen_main_window(app, monitor.inner());
        return;
    }

    // A code means an explicit exit call, which is never vetoed
    if let RunEvent::ExitRequested { code: None, api, .. } = event {
        let main_alive = app.get_webview_window(MAIN_WINDOW_LABEL).is_some();
        if !guard.on_all_surfaces_closed(&monitor, main_alive).allows_exit() {
            api.prevent_exit();
        }
    } else if matches!(event, RunEvent::Exit) {
        guard.on_before_quit(&monitor);
    }
}

fn build_main_window<M: Manager<Wry>>(manager: &M) -> tauri::Result<WebviewWindow> {
    WebviewWindowBuilder::new(manager, MAIN_WINDOW_LABEL, WebviewUrl::default())
        .title("ScrollStop")
        .inner_size(1200.0, 800.0)
        .resizable(true)
        .center()
        .build()
}

fn start_in_background(monitor: Arc<Monitor>) {
    // The first pass may open overlays, which needs a running event loop
    tauri::async_runtime::spawn_blocking(move || {
        if let Err(e) = monitor.start() {
            error!("Failed to start monitoring: {e}");
        }
    });
}

/// The dock icon was clicked with no window open: bring the dashboard back
/// and resume monitoring if it starts on its own.
#[cfg(target_os = "macos")]
fn reopen_main_window(app: &AppHandle, monitor: &Arc<Monitor>) {
    if app.get_webview_window(MAIN_WINDOW_LABEL).is_some() {
        return;
    }

    info!("Reopening main window");
    if let Err(e) = build_main_window(app) {
        error!("Failed to reopen main window: {e}");
        return;
    }

    let auto_start = app.try_state::<Settings>().is_some_and(|s| s.auto_start);
    let resume = app
        .try_state::<LifecycleGuard>()
        .is_some_and(|guard| guard.resume_on_reopen(monitor, auto_start));
    if resume {
        start_in_background(Arc::clone(monitor));
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let app = tauri::Builder::default()
        .plugin(
            tauri_plugin_log::Builder::new()
                .level(log::LevelFilter::Info)
                .build(),
        )
        .setup(|app| {
            let settings = Settings::load_or_default();
            let handle = app.handle().clone();

            let bridge: Arc<dyn AutomationBridge> = Arc::new(NativeBridge::new());
            let host: Arc<dyn OverlayHost> = Arc::new(TauriOverlayHost::new(handle.clone()));
            let sink: Arc<dyn DetectionSink> = Arc::new(TauriDetectionSink::new(handle));
            let monitor = Arc::new(Monitor::new(
                MonitorConfig::from_settings(&settings),
                bridge,
                host,
                sink,
            ));
            app.manage(Arc::clone(&monitor));
            app.manage(LifecycleGuard::new(settings.quit_policy));

            build_main_window(app.handle())?;

            if settings.auto_start {
                start_in_background(monitor);
            } else {
                info!("Auto-start disabled, waiting for start_monitoring");
            }
            app.manage(settings);

            Ok(())
        })
        .on_window_event(handle_window_event)
        .invoke_handler(tauri::generate_handler![
            commands::ipc::start_monitoring,
            commands::ipc::stop_monitoring,
            commands::ipc::get_monitoring_status,
            commands::ipc::check_apps_now,
            commands::ipc::dismiss_overlay,
        ])
        .build(tauri::generate_context!());

    match app {
        Ok(app) => app.run(|app, event| handle_run_event(app, &event)),
        Err(e) => error!("Error while building tauri application: {e}"),
    }
}

// src/constants.rs

use std::time::Duration;

/// Period between two scheduled detection passes
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// URL fragments that mark short-form video content
pub const SHORT_FORM_URL_PATTERNS: [&str; 4] = [
    "youtube.com/shorts",
    "instagram.com/reels",
    "tiktok.com",
    "vm.tiktok.com",
];

/// Native short-form apps as (name, bundle identifier)
pub const SHORT_FORM_APPS: [(&str, &str); 2] = [
    ("TikTok", "com.zhiliaoapp.musically"),
    ("Instagram", "com.burbn.instagram"),
];

/// Monitored browsers as (name, scripting application name, process names)
pub const MONITORED_BROWSERS: [(&str, &str, &[&str]); 2] = [
    ("Safari", "Safari", &["Safari"]),
    ("Chrome", "Google Chrome", &["Google Chrome", "Chrome"]),
];

/// Suffix appended to a browser name to form its target name
pub const BROWSER_TARGET_SUFFIX: &str = " (short-form tabs)";

/// Label of the dashboard window that owns every overlay
pub const MAIN_WINDOW_LABEL: &str = "main";

/// Overlay window labels are this prefix followed by a sequence number
pub const OVERLAY_LABEL_PREFIX: &str = "overlay-";

/// Page rendered inside overlay windows
pub const OVERLAY_PAGE: &str = "overlay.html";

pub const OVERLAY_WIDTH: f64 = 600.0;
pub const OVERLAY_HEIGHT: f64 = 400.0;

/// Event pushed to the dashboard when a pass finds new offenders
pub const DETECTION_EVENT: &str = "short-form-detected";

/// Maximum accepted target name length on the command interface
pub const MAX_TARGET_NAME_LEN: usize = 200;

/// Settings file name inside the platform config directory
pub const SETTINGS_FILE_NAME: &str = "settings.json";

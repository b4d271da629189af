//! Read-only detection queries.
//!
//! Every query fails safe: an automation error is logged and reported as a
//! negative result, which at worst defers enforcement by one pass.

use crate::models::{PatternSet, Target};
use crate::platform::AutomationBridge;
use log::debug;

/// Whether a process matching `name` is running.
pub fn is_running(bridge: &dyn AutomationBridge, name: &str) -> bool {
    if name.trim().is_empty() {
        return false;
    }

    match bridge.is_running(name) {
        Ok(running) => running,
        Err(e) => {
            debug!("Process query for {name} failed, treating as not running: {e}");
            false
        }
    }
}

/// Whether any open tab of `browser` matches `patterns`.
pub fn has_offending_tab(bridge: &dyn AutomationBridge, browser: &str, patterns: &PatternSet) -> bool {
    match bridge.list_tabs(browser) {
        Ok(urls) => patterns.any_match(urls.iter().map(String::as_str)),
        Err(e) => {
            debug!("Tab query for {browser} failed, treating as clean: {e}");
            false
        }
    }
}

/// Whether `target` is currently offending.
pub fn is_offending(bridge: &dyn AutomationBridge, target: &Target, patterns: &PatternSet) -> bool {
    match target {
        Target::NativeApp { name, bundle_id } => {
            is_running(bridge, name)
                || bundle_id
                    .as_deref()
                    .is_some_and(|id| is_running(bridge, id))
        }
        Target::BrowserHost {
            scripting_name,
            process_names,
            ..
        } => {
            process_names.iter().any(|p| is_running(bridge, p))
                && has_offending_tab(bridge, scripting_name, patterns)
        }
    }
}

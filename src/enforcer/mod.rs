use crate::models::{PatternSet, Target};
use crate::platform::AutomationBridge;
use log::{info, warn};

/// Close what makes `target` offend.
///
/// Browsers only lose the tabs matching `patterns`; native apps are quit.
/// Failures are logged and reported as `false` so the next pass retries.
pub fn enforce(bridge: &dyn AutomationBridge, target: &Target, patterns: &PatternSet) -> bool {
    let result = match target {
        Target::BrowserHost { scripting_name, .. } => bridge
            .close_tabs(scripting_name, &|url| patterns.matches(url))
            .map(|closed| info!("Closed {closed} short-form tab(s) in {scripting_name}")),
        Target::NativeApp { name, .. } => bridge
            .quit_app(name)
            .map(|()| info!("Asked {name} to quit")),
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to enforce against {}: {e}", target.name());
            false
        }
    }
}

use crate::constants::{BROWSER_TARGET_SUFFIX, MONITORED_BROWSERS, SHORT_FORM_APPS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetCategory {
    Browser,
    App,
}

/// Something the monitor evaluates on every pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Offending while a matching process exists.
    NativeApp {
        name: String,
        bundle_id: Option<String>,
    },
    /// Offending while one of its tabs matches the pattern set.
    BrowserHost {
        name: String,
        /// Application name used when scripting the browser
        scripting_name: String,
        /// Any of these running means the browser is up
        process_names: Vec<String>,
    },
}

impl Target {
    pub fn native_app(name: &str, bundle_id: Option<&str>) -> Self {
        Self::NativeApp {
            name: name.to_string(),
            bundle_id: bundle_id.map(str::to_string),
        }
    }

    pub fn browser(name: &str, scripting_name: &str, process_names: &[&str]) -> Self {
        Self::BrowserHost {
            name: name.to_string(),
            scripting_name: scripting_name.to_string(),
            process_names: process_names.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    /// Built-in target list: native apps first, then browsers.
    pub fn defaults() -> Vec<Self> {
        let apps = SHORT_FORM_APPS
            .iter()
            .map(|(name, bundle_id)| Self::native_app(name, Some(bundle_id)));
        let browsers = MONITORED_BROWSERS
            .iter()
            .map(|(name, scripting_name, processes)| Self::browser(name, scripting_name, processes));
        apps.chain(browsers).collect()
    }

    /// Name the target is known by in overlays, events and check results.
    ///
    /// Native apps use their own name; browsers are reported as
    /// `"<Browser> (short-form tabs)"` since only some of their tabs offend.
    pub fn name(&self) -> String {
        match self {
            Self::NativeApp { name, .. } => name.clone(),
            Self::BrowserHost { name, .. } => format!("{name}{BROWSER_TARGET_SUFFIX}"),
        }
    }

    pub fn category(&self) -> TargetCategory {
        match self {
            Self::NativeApp { .. } => TargetCategory::App,
            Self::BrowserHost { .. } => TargetCategory::Browser,
        }
    }
}

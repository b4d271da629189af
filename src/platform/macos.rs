use super::process::ProcessTable;
use super::script::{close_tabs_script, list_tabs_script, parse_tab_listing, quit_script};
use super::types::{AutomationBridge, BrowserTab};
use crate::error::AppError;
use log::debug;
use std::process::Command;

/// Automation through `osascript` and the process table.
#[derive(Default)]
pub struct MacOSBridge {
    processes: ProcessTable,
}

impl MacOSBridge {
    pub fn new() -> Self {
        Self {
            processes: ProcessTable::new(),
        }
    }

    fn run_script(command: &'static str, script: &str) -> Result<String, AppError> {
        let output = Command::new("osascript")
            .arg("-e")
            .arg(script)
            .output()
            .map_err(|e| AppError::automation(command, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::automation(command, stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn tabs(&self, browser: &str) -> Result<Vec<BrowserTab>, AppError> {
        let output = Self::run_script("list tabs", &list_tabs_script(browser))?;
        Ok(parse_tab_listing(&output))
    }
}

impl AutomationBridge for MacOSBridge {
    fn is_running(&self, name: &str) -> Result<bool, AppError> {
        Ok(self.processes.is_running(name))
    }

    fn list_tabs(&self, browser: &str) -> Result<Vec<String>, AppError> {
        Ok(self.tabs(browser)?.into_iter().map(|tab| tab.url).collect())
    }

    fn close_tabs(
        &self,
        browser: &str,
        predicate: &dyn Fn(&str) -> bool,
    ) -> Result<usize, AppError> {
        let matching: Vec<BrowserTab> = self
            .tabs(browser)?
            .into_iter()
            .filter(|tab| predicate(&tab.url))
            .collect();

        if matching.is_empty() {
            debug!("No matching tabs left to close in {browser}");
            return Ok(0);
        }

        Self::run_script("close tabs", &close_tabs_script(browser, &matching))?;
        Ok(matching.len())
    }

    fn quit_app(&self, name: &str) -> Result<(), AppError> {
        Self::run_script("quit app", &quit_script(name))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires macOS automation permission for Safari
    fn test_list_safari_tabs() {
        let bridge = MacOSBridge::new();
        let tabs = bridge.list_tabs("Safari").unwrap();
        for url in tabs {
            debug!("Safari tab: {url}");
        }
    }
}

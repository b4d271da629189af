pub mod process;
pub mod script;
pub mod types;

pub use types::{AutomationBridge, BrowserTab};

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::MacOSBridge as NativeBridge;

#[cfg(not(target_os = "macos"))]
pub use fallback::FallbackBridge as NativeBridge;

// Processes can still be found and terminated elsewhere, but browser tabs
// are only reachable through AppleScript.
#[cfg(not(target_os = "macos"))]
mod fallback {
    use super::process::ProcessTable;
    use super::types::AutomationBridge;
    use crate::error::AppError;
    use log::info;

    #[derive(Default)]
    pub struct FallbackBridge {
        processes: ProcessTable,
    }

    impl FallbackBridge {
        pub fn new() -> Self {
            Self {
                processes: ProcessTable::new(),
            }
        }
    }

    impl AutomationBridge for FallbackBridge {
        fn is_running(&self, name: &str) -> Result<bool, AppError> {
            Ok(self.processes.is_running(name))
        }

        fn list_tabs(&self, _browser: &str) -> Result<Vec<String>, AppError> {
            Err(AppError::Unsupported {
                operation: "Listing browser tabs",
            })
        }

        fn close_tabs(
            &self,
            _browser: &str,
            _predicate: &dyn Fn(&str) -> bool,
        ) -> Result<usize, AppError> {
            Err(AppError::Unsupported {
                operation: "Closing browser tabs",
            })
        }

        fn quit_app(&self, name: &str) -> Result<(), AppError> {
            let terminated = self.processes.terminate(name);
            info!("Sent SIGTERM to {terminated} process(es) matching {name}");
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_tab_operations_are_unsupported() {
            let bridge = FallbackBridge::new();
            assert!(matches!(
                bridge.list_tabs("Safari"),
                Err(AppError::Unsupported { .. })
            ));
            assert!(bridge.close_tabs("Safari", &|_| true).is_err());
        }
    }
}

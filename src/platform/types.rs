use crate::error::AppError;

/// One open browser tab as reported by the scripting bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserTab {
    pub window_id: i64,
    /// 1-based position within its window
    pub index: u32,
    pub url: String,
}

/// Boundary to the operating system's process table and app scripting.
///
/// Everything platform specific lives behind this trait so the monitor can
/// run against a fake in tests.
pub trait AutomationBridge: Send + Sync {
    /// Whether any process matches `name` (case-insensitive substring).
    fn is_running(&self, name: &str) -> Result<bool, AppError>;

    /// URLs of every open tab of `browser`.
    fn list_tabs(&self, browser: &str) -> Result<Vec<String>, AppError>;

    /// Close the tabs of `browser` whose URL satisfies `predicate`.
    /// Returns the number of tabs closed.
    fn close_tabs(&self, browser: &str, predicate: &dyn Fn(&str) -> bool)
        -> Result<usize, AppError>;

    /// Ask the application `name` to quit.
    fn quit_app(&self, name: &str) -> Result<(), AppError>;
}

use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Automation command '{command}' failed: {reason}")]
    Automation { command: &'static str, reason: String },

    #[error("{operation} is not supported on this platform")]
    Unsupported { operation: &'static str },

    #[error("Main window is not available")]
    NoMainSurface,

    #[error("Window error: {0}")]
    Window(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine project directories")]
    NoProjectDirs,
}

// For Tauri command returns - converts AppError to String
impl From<AppError> for String {
    fn from(e: AppError) -> Self {
        e.to_string()
    }
}

impl AppError {
    pub fn automation(command: &'static str, reason: impl Into<String>) -> Self {
        Self::Automation {
            command,
            reason: reason.into(),
        }
    }
}

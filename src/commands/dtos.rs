use serde::Serialize;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MonitoringResponse {
    pub monitoring: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CheckResponse {
    pub detected: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DismissResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DismissResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

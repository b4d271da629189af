// Command handlers for the dashboard and overlay windows.

mod dtos;
#[cfg(feature = "desktop")]
pub mod ipc;
pub mod monitoring;

pub use dtos::*;
pub use monitoring::*;

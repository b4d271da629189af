pub mod commands;
pub mod config;
pub mod constants;
#[cfg(feature = "desktop")]
mod desktop;
pub mod enforcer;
pub mod error;
pub mod inspector;
pub mod lifecycle;
pub mod models;
pub mod monitor;
pub mod overlay;
pub mod platform;
#[cfg(test)]
mod test_utils;
pub mod validation;

#[cfg(feature = "desktop")]
pub use desktop::run;

//! Startup configuration and one-off provisioning.

mod admin;
mod config;

pub use admin::provision_admin_on_startup;
pub use config::{AppSettings, SettingsError};

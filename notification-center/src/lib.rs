//! Dossier notification center: configuration, telemetry and service wiring.

pub mod config;
pub mod provider;
pub mod telemetry;

#[rustfmt::skip]
pub use {
    config::{NotificationCenterConfig, NotificationConfig},
    provider::ServiceProvider,
    telemetry::initialize_telemetry,
};

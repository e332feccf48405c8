//! Per-process handler state.

use std::sync::Arc;

use shared::{Config, Cors, Mailer, Result, SlotRegistry, SmtpMailer};
use tracing::info;

/// Application state shared across requests.
///
/// One instance lives for the lifetime of the Lambda execution environment, so
/// every request served by the process sees the same slot registry.
pub struct AppState {
    pub registry: SlotRegistry,
    pub mailer: Arc<dyn Mailer>,
    pub cors: Cors,
    /// Refuse bookings for slots that are already taken
    pub slot_check_enabled: bool,
}

impl AppState {
    pub fn new(config: &Config, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            registry: SlotRegistry::new(),
            mailer,
            cors: Cors::new(config.cors_origin.clone()),
            slot_check_enabled: config.slot_check_enabled,
        }
    }

    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        let mailer = SmtpMailer::from_config(&config)?;

        info!(
            "Booking API configured: smtp={}:{}, cors_origin={}, slot_check={}",
            config.smtp_host, config.smtp_port, config.cors_origin, config.slot_check_enabled
        );

        Ok(Self::new(&config, Arc::new(mailer)))
    }
}
